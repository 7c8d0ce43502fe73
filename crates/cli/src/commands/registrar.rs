use serde_json::Value;

use parecer_agent::ToolRegistry;
use parecer_core::AppConfig;
use parecer_store::build_backends;

use crate::commands::{build_runtime, CommandResult};

pub fn run(config: &AppConfig, raw: &str) -> CommandResult {
    let payload: Value = match serde_json::from_str(raw) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure(
                "registrar",
                "invalid_input",
                format!("payload JSON inválido: {error}"),
                2,
            );
        }
    };

    let backends = match build_backends(config) {
        Ok(backends) => backends,
        Err(error) => {
            return CommandResult::failure("registrar", "backend", error.to_string(), 4);
        }
    };
    let runtime = match build_runtime("registrar") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let registry = ToolRegistry::with_backends(&backends);
    let result = runtime.block_on(registry.execute("registrar_parecer", payload));

    match result {
        Ok(outcome) if outcome["sucesso"] == Value::Bool(true) => {
            CommandResult::success("registrar", outcome)
        }
        Ok(outcome) => {
            let message = outcome["mensagem"].as_str().unwrap_or("registro recusado").to_string();
            CommandResult::failure("registrar", "registration_rejected", message, 5)
        }
        Err(error) => CommandResult::failure("registrar", "invalid_input", error.to_string(), 2),
    }
}
