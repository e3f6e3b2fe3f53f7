use serde::{Deserialize, Serialize};

/// Canonical part-template identifiers. Closed set: the consuming planner
/// maps these back to sections and templates on its side, so renaming any
/// of them is a breaking change.
pub mod templates {
    pub const DISCURSO: &str = "tpl_discurso";
    pub const JOIAS: &str = "tpl_joias";
    pub const LEITURA: &str = "tpl_leitura";

    pub const INICIANDO: &str = "tpl_iniciando";
    pub const CULTIVANDO: &str = "tpl_cultivando";
    pub const DISCIPULOS: &str = "tpl_discipulos";
    pub const CRENCAS: &str = "tpl_crencas";
    pub const ESTUDO_BIBLICO: &str = "tpl_estudo_biblico";
    pub const DISCURSO_MINISTERIO: &str = "tpl_discurso_ministerio";

    pub const ESTUDO: &str = "tpl_estudo";
    pub const NECESSIDADES: &str = "tpl_necessidades";
    pub const ORACAO: &str = "tpl_oracao";
}

/// One draft meeting-part record, in the shape the schedule editor and
/// auto-fill UI consume. Field names follow the collaborator contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAssignment {
    pub part_template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
}

impl DraftAssignment {
    pub fn new(part_template_id: &str) -> Self {
        Self {
            part_template_id: part_template_id.to_owned(),
            theme_title: None,
            observation: None,
            time_minutes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_contract_keys_and_skips_absent_fields() -> anyhow::Result<()> {
        let mut draft = DraftAssignment::new(templates::LEITURA);
        draft.observation = Some("Provérbios 1-5".to_owned());
        draft.time_minutes = Some(4);

        let json = serde_json::to_string(&draft)?;
        assert_eq!(
            json,
            r#"{"partTemplateId":"tpl_leitura","observation":"Provérbios 1-5","timeMinutes":4}"#
        );

        Ok(())
    }
}
