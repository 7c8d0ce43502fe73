//! Seed data for the in-memory backends, matching the supplier and
//! service scenarios the governance flow must handle: healthy renewals,
//! a contract with no expiration date, one expiring beyond two years,
//! a service marked Desinvestir, and suppliers with and without history.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde_json::{json, Value};

use parecer_core::{
    CatalogRecord, ContractRecord, OpinionHistoryEntry, OpinionId, OpinionType,
    StrategicDirection, TaxId,
};

pub fn contracts() -> Vec<ContractRecord> {
    let now = Utc::now();
    vec![
        ContractRecord {
            tax_id: TaxId::normalize("12345678000190"),
            registered: true,
            expires_at: Some(now + Duration::days(540)),
            contract_type: Some("Renovação".to_string()),
            supplier_name: Some("Tech Solutions LTDA".to_string()),
            context: context(&[
                ("categoria", json!("Tecnologia")),
                ("ultima_renovacao", json!("2024-01-15")),
                ("valor_contrato", json!("R$ 250.000,00")),
            ]),
            last_updated: Some("2024-10-15".to_string()),
        },
        ContractRecord {
            tax_id: TaxId::normalize("98765432000101"),
            registered: true,
            expires_at: Some(now + Duration::days(650)),
            contract_type: Some("Renovação".to_string()),
            supplier_name: Some("Cloud Data Services S.A.".to_string()),
            context: context(&[
                ("categoria", json!("Cloud")),
                ("ultima_renovacao", json!("2023-06-01")),
                ("valor_contrato", json!("R$ 1.200.000,00")),
            ]),
            last_updated: Some("2024-11-01".to_string()),
        },
        // No expiration date on file: renewal flows must hard-stop here.
        ContractRecord {
            tax_id: TaxId::normalize("11222333000144"),
            registered: true,
            expires_at: None,
            contract_type: Some("Nova Contratação".to_string()),
            supplier_name: Some("Analytics Platform Inc".to_string()),
            context: context(&[
                ("categoria", json!("Analytics")),
                ("primeira_contratacao", json!(true)),
            ]),
            last_updated: Some("2024-09-20".to_string()),
        },
        ContractRecord {
            tax_id: TaxId::normalize("55666777000188"),
            registered: true,
            expires_at: Some(now + Duration::days(450)),
            contract_type: Some("Renovação".to_string()),
            supplier_name: Some("Security Consulting Group".to_string()),
            context: context(&[
                ("categoria", json!("Segurança")),
                ("ultima_renovacao", json!("2024-03-01")),
                ("valor_contrato", json!("R$ 180.000,00")),
            ]),
            last_updated: Some("2024-11-10".to_string()),
        },
        // Expires ~30 months out: past the two-year window, alert only.
        ContractRecord {
            tax_id: TaxId::normalize("11223344000155"),
            registered: true,
            expires_at: Some(now + Duration::days(900)),
            contract_type: Some("Renovação".to_string()),
            supplier_name: Some("Cloud Provider Inc".to_string()),
            context: context(&[
                ("categoria", json!("Cloud")),
                ("ultima_renovacao", json!("2022-12-01")),
                ("valor_contrato", json!("R$ 3.500.000,00")),
            ]),
            last_updated: Some("2024-11-15".to_string()),
        },
    ]
}

pub fn catalog() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord {
            service_id: "API-001".to_string(),
            registered: true,
            service_code: Some("CRM-API".to_string()),
            direction: Some(StrategicDirection::Evoluir),
            description: Some("API de integração com CRM".to_string()),
            technology: Some("REST".to_string()),
            version: Some("2.0".to_string()),
            owner: Some("Arquitetura - Squad CRM".to_string()),
        },
        CatalogRecord {
            service_id: "API-002".to_string(),
            registered: true,
            service_code: Some("CLOUD-STORAGE".to_string()),
            direction: Some(StrategicDirection::Manter),
            description: Some("Serviço de armazenamento em nuvem".to_string()),
            technology: Some("S3-Compatible".to_string()),
            version: Some("1.5".to_string()),
            owner: Some("Infraestrutura Cloud".to_string()),
        },
        CatalogRecord {
            service_id: "API-003".to_string(),
            registered: true,
            service_code: Some("ANALYTICS-ENGINE".to_string()),
            direction: Some(StrategicDirection::Evoluir),
            description: Some("Motor de analytics e BI".to_string()),
            technology: Some("GraphQL".to_string()),
            version: Some("3.1".to_string()),
            owner: Some("Arquitetura - Squad Analytics".to_string()),
        },
        CatalogRecord {
            service_id: "API-004".to_string(),
            registered: true,
            service_code: Some("LEGACY-SYSTEM".to_string()),
            direction: Some(StrategicDirection::Desinvestir),
            description: Some("Sistema legado em descontinuação".to_string()),
            technology: Some("SOAP".to_string()),
            version: Some("1.0".to_string()),
            owner: Some("Arquitetura - Legacy".to_string()),
        },
        CatalogRecord {
            service_id: "API-005".to_string(),
            registered: true,
            service_code: Some("SEC-GATEWAY".to_string()),
            direction: Some(StrategicDirection::Manter),
            description: Some("Gateway de segurança".to_string()),
            technology: Some("REST + OAuth2".to_string()),
            version: Some("2.5".to_string()),
            owner: Some("Segurança da Informação".to_string()),
        },
    ]
}

pub fn opinion_history() -> Vec<OpinionHistoryEntry> {
    vec![
        OpinionHistoryEntry {
            opinion_id: OpinionId("PAR-2024-001".to_string()),
            date: "2024-01-15".to_string(),
            opinion_type: OpinionType::Favoravel,
            justification: "Fornecedor com histórico positivo. Renovação de contrato sem \
                            alterações significativas."
                .to_string(),
            caveats: Vec::new(),
            analyst: "João Silva".to_string(),
            tax_id: TaxId::normalize("12345678000190"),
            service_type: "API de CRM".to_string(),
        },
        OpinionHistoryEntry {
            opinion_id: OpinionId("PAR-2024-002".to_string()),
            date: "2023-06-01".to_string(),
            opinion_type: OpinionType::FavoravelComRessalvas,
            justification: "Fornecedor adequado para o serviço, porém com ressalvas sobre \
                            documentação."
                .to_string(),
            caveats: vec![
                "Documentação técnica deve ser atualizada trimestralmente".to_string(),
                "SLA deve ser revisado após 6 meses de operação".to_string(),
            ],
            analyst: "Maria Santos".to_string(),
            tax_id: TaxId::normalize("98765432000101"),
            service_type: "Cloud Storage".to_string(),
        },
        OpinionHistoryEntry {
            opinion_id: OpinionId("PAR-2023-045".to_string()),
            date: "2022-12-10".to_string(),
            opinion_type: OpinionType::Favoravel,
            justification: "Primeira contratação aprovada com base em análise de mercado."
                .to_string(),
            caveats: Vec::new(),
            analyst: "Carlos Oliveira".to_string(),
            tax_id: TaxId::normalize("98765432000101"),
            service_type: "Cloud Infrastructure".to_string(),
        },
        OpinionHistoryEntry {
            opinion_id: OpinionId("PAR-2024-003".to_string()),
            date: "2024-03-01".to_string(),
            opinion_type: OpinionType::FavoravelComRessalvas,
            justification: "Consultoria aprovada com ressalvas sobre escopo de atuação."
                .to_string(),
            caveats: vec![
                "Atuação restrita a análise e recomendações, sem acesso direto aos sistemas \
                 produtivos"
                    .to_string(),
                "Relatórios devem ser revisados pela equipe de Segurança antes de implementação"
                    .to_string(),
            ],
            analyst: "Ana Costa".to_string(),
            tax_id: TaxId::normalize("55666777000188"),
            service_type: "Consultoria de Segurança".to_string(),
        },
    ]
}

fn context(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
}
