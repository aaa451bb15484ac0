//! Reader for NCBI `esearch.fcgi` responses.
//!
//! Only the `IdList` directly under the `eSearchResult` root is consumed:
//!
//! ```xml
//! <eSearchResult>
//!   <Count>1</Count>
//!   <RetMax>1</RetMax>
//!   <RetStart>0</RetStart>
//!   <IdList>
//!     <Id>672</Id>
//!   </IdList>
//!   ...
//! </eSearchResult>
//! ```

use crate::domain::model::GeneIdList;
use crate::utils::error::{GeneIdError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const ID_LIST_TAG: &[u8] = b"IdList";
const ID_TAG: &[u8] = b"Id";

// 元素深度：根 = 1，IdList = 2，Id = 3
const ROOT_CHILD_DEPTH: usize = 2;
const ID_DEPTH: usize = 3;

#[derive(Debug, Default)]
struct IdListScan {
    depth: usize,
    saw_root: bool,
    root_closed: bool,
    inside_id_list: bool,
    id_list_closed: bool,
    first_child_is_id: Option<bool>,
    current_text: Option<String>,
    ids: GeneIdList,
}

impl IdListScan {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<()> {
        if self.root_closed {
            return Err(malformed(format!(
                "element <{}> after the root element",
                String::from_utf8_lossy(element.name().as_ref())
            )));
        }

        self.depth += 1;
        if self.depth == 1 {
            self.saw_root = true;
        }

        let name = element.name();
        if self.depth == ROOT_CHILD_DEPTH && !self.id_list_closed && name.as_ref() == ID_LIST_TAG {
            self.inside_id_list = true;
        } else if self.depth == ID_DEPTH && self.inside_id_list {
            if self.first_child_is_id.is_none() {
                self.first_child_is_id = Some(name.as_ref() == ID_TAG);
            }
            self.current_text = Some(String::new());
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.depth == 0 && !text.trim().is_empty() {
            return Err(malformed("text outside the root element".to_string()));
        }
        if self.depth == ID_DEPTH {
            if let Some(current) = self.current_text.as_mut() {
                current.push_str(text);
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.depth == ID_DEPTH {
            if let Some(text) = self.current_text.take() {
                // 無法轉成整數的內容直接略過
                if let Ok(id) = text.trim().parse::<i64>() {
                    self.ids.push(id);
                }
            }
        } else if self.depth == ROOT_CHILD_DEPTH && self.inside_id_list {
            self.inside_id_list = false;
            self.id_list_closed = true;
        }
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.root_closed = true;
        }
    }

    fn finish(self) -> Result<GeneIdList> {
        if !self.saw_root {
            return Err(malformed("document has no root element".to_string()));
        }
        if self.depth != 0 {
            return Err(malformed(format!(
                "{} element(s) still open at end of document",
                self.depth
            )));
        }

        match self.first_child_is_id {
            Some(true) => Ok(self.ids),
            _ => Ok(Vec::new()),
        }
    }
}

fn malformed(message: String) -> GeneIdError {
    GeneIdError::MalformedResponse { message }
}

/// Extract gene IDs from an esearch XML document.
///
/// Returns an empty list when the root has no `IdList` child, when that list
/// is empty, or when its first child is not an `Id`. `Id` values that are not
/// integers are skipped, so "no IDs" and "unparsable IDs" look the same.
pub fn parse_gene_ids(xml: &str) -> Result<GeneIdList> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut scan = IdListScan::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => scan.open(&element)?,
            Event::Empty(element) => {
                scan.open(&element)?;
                scan.close();
            }
            Event::End(_) => scan.close(),
            Event::Text(text) => {
                let text = text.unescape().map_err(quick_xml::Error::from)?;
                scan.text(&text)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                scan.text(&String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let ids = scan.finish()?;
    tracing::debug!("Parsed {} gene id(s) from esearch response", ids.len());
    Ok(ids)
}
