use clap::Parser;
use std::str::FromStr;
use tracing::debug;
use vox_analysis::application::{ConfigService, FetchLogsService, FetchOptions};
use vox_analysis::cli::{
    format_env_list, format_log_rows, format_summary, format_table_rows, Cli, Commands,
};
use vox_analysis::domain::MergePolicy;
use vox_analysis::error::{AnalysisError, Result};
use vox_analysis::infrastructure::{
    default_export_path, init_logging, ConfigStore, RowQuery, SupabaseClient, TEXT_LOGS_TABLE,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let policy = MergePolicy::from_str(&cli.precedence).map_err(AnalysisError::Config)?;
    let store = ConfigStore::from_process_env(cli.env_file)?.with_policy(policy);
    debug!(env_file = %store.env_file().display(), "resolved env file");

    match cli.command {
        Commands::Env { reveal } => {
            let mut service = ConfigService::new(store);
            let lines = service.list(reveal)?;
            println!("{}", format_env_list(&lines).trim_end());
            Ok(())
        }
        Commands::Get { key, default } => {
            let mut service = ConfigService::new(store);
            let value = service.get(&key, default.as_deref())?;
            println!("{}", value);
            Ok(())
        }
        Commands::Logs {
            table,
            order_by,
            limit,
            sample,
            export,
            output,
        } => {
            let mut store = store;
            let client = SupabaseClient::from_config(&mut store)?;
            println!("Connected to Supabase at: {}", client.base_url());

            let export = output.or_else(|| {
                export.then(|| default_export_path(store.project_root(), &table))
            });
            let options = FetchOptions {
                query: RowQuery::table(table.as_str())
                    .order_by(order_by)
                    .limit(limit),
                export,
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let service = FetchLogsService::new(client);

            let exported = if table == TEXT_LOGS_TABLE {
                let report = runtime.block_on(service.execute(options))?;
                println!(
                    "Retrieved {} records from the {} table.",
                    report.logs.len(),
                    table
                );
                println!("{}", format_log_rows(&report.logs, sample).trim_end());
                if !report.logs.is_empty() {
                    println!();
                    print!("{}", format_summary(&report.summary, &report.logs, sample));
                }
                report.exported
            } else {
                let report = runtime.block_on(service.execute_table(options))?;
                println!(
                    "Retrieved {} records from the {} table.",
                    report.table.len(),
                    table
                );
                println!("{}", format_table_rows(&report.table, sample).trim_end());
                report.exported
            };

            if let Some(path) = exported {
                println!("Saved {} data to {}", table, path.display());
            }
            Ok(())
        }
    }
}
