use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One input on a document generation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TemplateField {
    pub id: String,
    pub label: String,
    pub required: bool,
    #[serde(default)]
    pub multiline: bool,
}

impl TemplateField {
    fn required(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: true,
            multiline: false,
        }
    }

    fn optional(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: false,
            multiline: false,
        }
    }

    fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

/// A document generation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<TemplateField>,
}

/// Templates shipped with the application.
pub fn builtin_templates() -> Vec<DocumentTemplate> {
    vec![
        DocumentTemplate {
            id: "statement_of_claim".to_string(),
            name: "Statement of Claim".to_string(),
            description: "Originating pleading setting out the plaintiff's case".to_string(),
            fields: vec![
                TemplateField::required("plaintiff", "Plaintiff"),
                TemplateField::required("defendant", "Defendant"),
                TemplateField::required("case_number", "Action number"),
                TemplateField::required("facts", "Material facts").multiline(),
                TemplateField::required("relief", "Relief sought").multiline(),
            ],
        },
        DocumentTemplate {
            id: "witness_statement".to_string(),
            name: "Witness Statement".to_string(),
            description: "Factual evidence of a witness in numbered paragraphs".to_string(),
            fields: vec![
                TemplateField::required("witness_name", "Witness name"),
                TemplateField::optional("occupation", "Occupation"),
                TemplateField::required("case_number", "Action number"),
                TemplateField::required("statement", "Statement").multiline(),
            ],
        },
        DocumentTemplate {
            id: "letter_before_action".to_string(),
            name: "Letter Before Action".to_string(),
            description: "Pre-action demand letter to the prospective defendant".to_string(),
            fields: vec![
                TemplateField::required("recipient", "Recipient"),
                TemplateField::required("client", "Client"),
                TemplateField::required("demand", "Demand").multiline(),
                TemplateField::optional("deadline_days", "Days to respond"),
            ],
        },
    ]
}

/// Look up a built-in template by id.
pub fn find_template(id: &str) -> Option<DocumentTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

/// Request body for document generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateDocumentRequest {
    pub template_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Generated document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedDocument {
    pub template_id: String,
    pub content: String,
}
