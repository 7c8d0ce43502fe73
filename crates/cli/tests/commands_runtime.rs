use serde_json::{json, Value};

use parecer_cli::commands::{avaliar, consultar, registrar, seed};
use parecer_core::AppConfig;

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output must be valid JSON")
}

fn evaluation_args(cnpj: &str, api_id: &str) -> avaliar::Args {
    avaliar::Args {
        cnpj: cnpj.to_string(),
        api_id: api_id.to_string(),
        tipo: "Renovação".to_string(),
        integracoes: vec!["REST".to_string(), "WEBHOOK".to_string(), "MENSAGERIA".to_string()],
        fluxo: Some("BIDIRECIONAL".to_string()),
        armazena_dados_bv: false,
        email: None,
        diretoria: None,
        registrar: false,
    }
}

#[test]
fn avaliar_returns_a_favorable_opinion_for_the_strong_renewal() {
    let result = avaliar::run(&AppConfig::default(), evaluation_args("12345678000190", "API-001"));
    assert_eq!(result.exit_code, 0, "expected successful evaluation");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "avaliar");
    assert_eq!(payload["data"]["resultado"], "AVALIADO");
    assert_eq!(payload["data"]["parecer"]["parecer_sugerido"], "Parecer Favorável");
    assert_eq!(payload["data"]["registro"], Value::Null);
}

#[test]
fn avaliar_blocks_renewal_without_expiration_date() {
    let result = avaliar::run(&AppConfig::default(), evaluation_args("11222333000144", "API-003"));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["resultado"], "BLOQUEADO");
    assert_eq!(payload["data"]["vencimento"]["status"], "BLOQUEIO");
}

#[test]
fn avaliar_with_registration_returns_a_receipt() {
    let mut args = evaluation_args("12345678000190", "API-001");
    args.registrar = true;

    let result = avaliar::run(&AppConfig::default(), args);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert!(payload["data"]["registro"]["parecer_id"]
        .as_str()
        .expect("receipt id")
        .starts_with("PAR-"));
    assert_eq!(payload["data"]["registro"]["status"], "REGISTRADO");
}

#[test]
fn avaliar_rejects_malformed_cnpj_with_exit_code_two() {
    let result = avaliar::run(&AppConfig::default(), evaluation_args("123", "API-001"));
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "invalid_input");
}

#[test]
fn avaliar_reports_unknown_supplier_as_not_found() {
    let result = avaliar::run(&AppConfig::default(), evaluation_args("00000000000000", "API-001"));
    assert_eq!(result.exit_code, 5);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "not_found");
}

#[test]
fn avaliar_rejects_unknown_request_type_label() {
    let mut args = evaluation_args("12345678000190", "API-001");
    args.tipo = "Aditivo".to_string();

    let result = avaliar::run(&AppConfig::default(), args);
    assert_eq!(result.exit_code, 2);
}

#[test]
fn consultar_requires_at_least_one_selector() {
    let result = consultar::run(&AppConfig::default(), None, None, None);
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "invalid_input");
}

#[test]
fn consultar_returns_supplier_and_service_sections() {
    let result = consultar::run(
        &AppConfig::default(),
        Some("98765432000101".to_string()),
        Some("API-002".to_string()),
        None,
    );
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["fornecedor"]["encontrado"], true);
    assert_eq!(payload["data"]["servico"]["sigla"], "CLOUD-STORAGE");
    assert_eq!(payload["data"]["ressalvas_anteriores"]["tem_ressalvas"], true);
    assert!(payload["data"].get("historico").is_none());
}

#[test]
fn consultar_with_service_type_adds_the_history_section() {
    let result = consultar::run(
        &AppConfig::default(),
        Some("98765432000101".to_string()),
        None,
        Some("cloud".to_string()),
    );
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["historico"]["total_encontrados"], 2);
    assert!(payload["data"]["historico"]["sugestoes_texto"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s.as_str().unwrap().contains("histórico positivo")));
}

#[test]
fn consultar_rejects_service_type_without_cnpj() {
    let result = consultar::run(
        &AppConfig::default(),
        None,
        Some("API-002".to_string()),
        Some("cloud".to_string()),
    );
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "invalid_input");
}

#[test]
fn registrar_accepts_a_complete_payload() {
    let payload = json!({
        "cnpj": "12345678000190",
        "nome_fornecedor": "Tech Solutions LTDA",
        "api_id": "API-001",
        "tipo_requisicao": "Renovação",
        "parecer_sugerido": "Parecer Favorável",
        "justificativa": "Parecer FAVORÁVEL para renovação.",
    });

    let result = registrar::run(&AppConfig::default(), &payload.to_string());
    assert_eq!(result.exit_code, 0);

    let outcome = parse_payload(&result.output);
    assert_eq!(outcome["data"]["sucesso"], true);
    assert_eq!(outcome["data"]["proximo_status"], "AGUARDANDO_REVISAO_ANALISTA");
}

#[test]
fn registrar_rejects_incomplete_payload_with_field_list() {
    let result =
        registrar::run(&AppConfig::default(), r#"{"cnpj": "12345678000190"}"#);
    assert_eq!(result.exit_code, 5);

    let outcome = parse_payload(&result.output);
    assert_eq!(outcome["error_class"], "registration_rejected");
    assert!(outcome["message"].as_str().unwrap().contains("Campos obrigatórios ausentes"));
}

#[test]
fn registrar_rejects_invalid_json() {
    let result = registrar::run(&AppConfig::default(), "not-json");
    assert_eq!(result.exit_code, 2);
}

#[test]
fn seed_output_is_deterministic() {
    let first = seed::run(&AppConfig::default());
    let second = seed::run(&AppConfig::default());
    assert_eq!(first.output, second.output);
}
