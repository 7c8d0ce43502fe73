use serde_json::json;

use parecer_core::AppConfig;
use parecer_store::fixtures;

use crate::commands::CommandResult;

/// The mock backend is seeded in memory on every start; this command
/// just shows what that dataset contains.
pub fn run(_config: &AppConfig) -> CommandResult {
    let contracts = fixtures::contracts();
    let catalog = fixtures::catalog();
    let history = fixtures::opinion_history();

    let suppliers: Vec<_> = contracts
        .iter()
        .map(|contract| {
            json!({
                "cnpj": contract.tax_id.as_str(),
                "nome_fornecedor": contract.supplier_name,
                "possui_vencimento": contract.expires_at.is_some(),
            })
        })
        .collect();
    let services: Vec<_> = catalog
        .iter()
        .map(|service| {
            json!({
                "api_id": service.service_id,
                "sigla": service.service_code,
                "direcionador": service.direction,
            })
        })
        .collect();

    CommandResult::success(
        "seed",
        json!({
            "fornecedores": suppliers,
            "servicos": services,
            "pareceres_historicos": history.len(),
        }),
    )
}
