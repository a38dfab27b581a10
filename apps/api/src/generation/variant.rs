//! Prompt variants: which fields a form collects and which template it applies.
//!
//! The page offers one generic form; a variant is the declarative
//! (field set, template, temperature, export) tuple that configures it.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::generation::prompts::{
    DETAILED_PROMPT_TEMPLATE, IDEAS_PROMPT_TEMPLATE, PASSION_PROMPT_TEMPLATE,
};
use crate::models::ProfileField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Resume in, ideas table + personal analysis out, exported as PDF.
    #[default]
    Ideas,
    /// Resume in, long-form evaluation with visuals out, downloaded as HTML.
    Detailed,
    /// Name, domain, passion and resume in, domain-anchored ideas out.
    Passion,
}

impl PromptVariant {
    pub const ALL: [PromptVariant; 3] = [
        PromptVariant::Ideas,
        PromptVariant::Detailed,
        PromptVariant::Passion,
    ];

    /// Fields collected by the form, in display order.
    pub fn fields(self) -> &'static [ProfileField] {
        match self {
            PromptVariant::Ideas | PromptVariant::Detailed => &[ProfileField::Resume],
            PromptVariant::Passion => &[
                ProfileField::Name,
                ProfileField::Domain,
                ProfileField::Passion,
                ProfileField::Resume,
            ],
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            PromptVariant::Ideas => IDEAS_PROMPT_TEMPLATE,
            PromptVariant::Detailed => DETAILED_PROMPT_TEMPLATE,
            PromptVariant::Passion => PASSION_PROMPT_TEMPLATE,
        }
    }

    /// `None` leaves the endpoint's default sampling temperature.
    pub fn temperature(self) -> Option<f32> {
        match self {
            PromptVariant::Ideas | PromptVariant::Passion => Some(0.0),
            PromptVariant::Detailed => None,
        }
    }

    pub fn default_export(self) -> ExportFormat {
        match self {
            PromptVariant::Ideas | PromptVariant::Passion => ExportFormat::Pdf,
            PromptVariant::Detailed => ExportFormat::Html,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptVariant::Ideas => "ideas",
            PromptVariant::Detailed => "detailed",
            PromptVariant::Passion => "passion",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            PromptVariant::Ideas => {
                "Igniting your entrepreneurial spark by weaving your background into visionary startups."
            }
            PromptVariant::Detailed => {
                "Unleash your unique abilities, ignite your deepest passions, and together, let's transform the world."
            }
            PromptVariant::Passion => "Turn what you love and what you know into a company worth building.",
        }
    }
}

/// Catalogue entry served to the page so it can draw the right inputs.
#[derive(Debug, Clone, Serialize)]
pub struct VariantDescriptor {
    pub id: PromptVariant,
    pub tagline: &'static str,
    pub fields: Vec<FieldDescriptor>,
    pub default_export: ExportFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub field: ProfileField,
    pub label: &'static str,
    pub multiline: bool,
}

impl From<PromptVariant> for VariantDescriptor {
    fn from(variant: PromptVariant) -> Self {
        VariantDescriptor {
            id: variant,
            tagline: variant.tagline(),
            fields: variant
                .fields()
                .iter()
                .map(|&field| FieldDescriptor {
                    field,
                    label: field.label(),
                    multiline: matches!(field, ProfileField::Resume | ProfileField::Passion),
                })
                .collect(),
            default_export: variant.default_export(),
        }
    }
}
