pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parecer_core::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "parecer",
    about = "CLI do agente de pareceres técnicos",
    long_about = "Avalia requisições de contratação/renovação de fornecedores, consulta os \
                  registros de apoio (OneTrust, CMDB, histórico) e registra pareceres.",
    after_help = "Examples:\n  parecer avaliar --cnpj 12.345.678/0001-90 --api-id API-001 \
                  --integracao REST --fluxo BIDIRECIONAL\n  parecer consultar --cnpj \
                  12345678000190\n  parecer seed"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Evaluate a supplier/service request and print the suggested opinion")]
    Avaliar {
        #[arg(long, help = "Supplier CNPJ, formatted or bare digits")]
        cnpj: String,
        #[arg(long = "api-id", help = "Service/API identifier in the CMDB")]
        api_id: String,
        #[arg(long, default_value = "Renovação", help = "Renovação | Nova Contratação")]
        tipo: String,
        #[arg(long = "integracao", help = "Available integration, repeatable")]
        integracoes: Vec<String>,
        #[arg(long, help = "INBOUND | OUTBOUND | BIDIRECIONAL")]
        fluxo: Option<String>,
        #[arg(long = "armazena-dados-bv", help = "Supplier stores BV data on its infrastructure")]
        armazena_dados_bv: bool,
        #[arg(long, help = "Requester e-mail recorded on the opinion")]
        email: Option<String>,
        #[arg(long, help = "Requester directorate recorded on the opinion")]
        diretoria: Option<String>,
        #[arg(long, help = "Also register the suggested opinion")]
        registrar: bool,
    },
    #[command(about = "Look up a supplier or service across the backing records")]
    Consultar {
        #[arg(long, help = "Supplier CNPJ to look up in OneTrust and the opinion history")]
        cnpj: Option<String>,
        #[arg(long = "api-id", help = "Service/API identifier to look up in the CMDB")]
        api_id: Option<String>,
        #[arg(
            long = "tipo-servico",
            help = "Service-type filter for the historical-opinion search (requires --cnpj)"
        )]
        tipo_servico: Option<String>,
    },
    #[command(about = "Register an opinion from a JSON payload")]
    Registrar {
        #[arg(long, help = "Opinion fields as a JSON object")]
        dados: String,
    },
    #[command(about = "Show the deterministic fixture dataset served by the mock backend")]
    Seed,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions {
        config_path: cli.config,
        require_file: false,
        overrides: ConfigOverrides::default(),
    }) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_tracing(&config);

    let result = match cli.command {
        Command::Avaliar {
            cnpj,
            api_id,
            tipo,
            integracoes,
            fluxo,
            armazena_dados_bv,
            email,
            diretoria,
            registrar,
        } => commands::avaliar::run(
            &config,
            commands::avaliar::Args {
                cnpj,
                api_id,
                tipo,
                integracoes,
                fluxo,
                armazena_dados_bv,
                email,
                diretoria,
                registrar,
            },
        ),
        Command::Consultar { cnpj, api_id, tipo_servico } => {
            commands::consultar::run(&config, cnpj, api_id, tipo_servico)
        }
        Command::Registrar { dados } => commands::registrar::run(&config, &dados),
        Command::Seed => commands::seed::run(&config),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    // A second init (tests, repeated calls) is not an error worth dying for.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
