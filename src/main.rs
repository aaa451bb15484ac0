use clap::Parser;
use console::style;
use gene_id_lookup::utils::{logger, validation::Validate};
use gene_id_lookup::{
    CliConfig, DialoguerPrompter, EutilsClient, GeneIdError, Questionnaire, ReportPrinter,
};

fn exit_with(e: &GeneIdError) -> ! {
    tracing::error!("❌ {} (exit code {})", e, e.exit_code());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", style(format!("❌ {}", e.user_friendly_message())).red());
    eprintln!("{}", style(format!("💡 {}", e.recovery_suggestion())).yellow());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting gene-ids");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        exit_with(&e);
    }

    let selections = match cli.preset_selections() {
        Some(selections) => {
            tracing::info!("Using organisms and gene symbols from the command line");
            selections
        }
        None => {
            let questionnaire = Questionnaire::new(&settings.questionnaire);
            match questionnaire.run(&mut DialoguerPrompter::new()) {
                Ok(selections) => selections,
                Err(e) => exit_with(&e),
            }
        }
    };

    if selections.is_empty() {
        tracing::warn!("Nothing selected, no lookups to run");
        eprintln!("{}", style("No organisms or gene symbols selected").yellow());
        return Ok(());
    }

    let mut client = match EutilsClient::new(&settings.eutils) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };
    tracing::debug!(
        "Requests spaced by at least {:?}",
        client.limiter().spacing()
    );

    let mut printer = ReportPrinter::new(std::io::stdout(), settings.column_width());
    match printer.print_gene_info(&mut client, &selections).await {
        Ok(rows) => {
            tracing::info!("✅ Looked up {} gene symbol/organism pair(s)", rows);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
