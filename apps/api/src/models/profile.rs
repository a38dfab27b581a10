use serde::{Deserialize, Serialize};

/// Free-text inputs collected by the form. Nothing here is validated: any
/// string, including an empty one, is passed on to the prompt builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub passion: Option<String>,
}

/// One input a variant can collect. The serialized name doubles as the
/// template placeholder (`{resume}`, `{name}`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Resume,
    Name,
    Domain,
    Passion,
}

impl ProfileField {
    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileField::Resume => "resume",
            ProfileField::Name => "name",
            ProfileField::Domain => "domain",
            ProfileField::Passion => "passion",
        }
    }

    pub fn from_placeholder(name: &str) -> Option<Self> {
        match name {
            "resume" => Some(ProfileField::Resume),
            "name" => Some(ProfileField::Name),
            "domain" => Some(ProfileField::Domain),
            "passion" => Some(ProfileField::Passion),
            _ => None,
        }
    }

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Resume => "Input your resume...",
            ProfileField::Name => "Your first name",
            ProfileField::Domain => "Domain you want to build in",
            ProfileField::Passion => "What are you passionate about?",
        }
    }
}

impl UserProfile {
    /// Current value of `field`. Absent optional fields read as "".
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Resume => &self.resume,
            ProfileField::Name => self.name.as_deref().unwrap_or(""),
            ProfileField::Domain => self.domain.as_deref().unwrap_or(""),
            ProfileField::Passion => self.passion.as_deref().unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_read_as_empty() {
        let profile = UserProfile {
            resume: "Rust engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.value(ProfileField::Resume), "Rust engineer");
        assert_eq!(profile.value(ProfileField::Domain), "");
        assert_eq!(profile.value(ProfileField::Passion), "");
    }

    #[test]
    fn test_profile_deserializes_with_only_resume() {
        let profile: UserProfile = serde_json::from_str(r#"{"resume": ""}"#).unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_placeholder_names_round_trip() {
        for field in [
            ProfileField::Resume,
            ProfileField::Name,
            ProfileField::Domain,
            ProfileField::Passion,
        ] {
            assert_eq!(ProfileField::from_placeholder(field.placeholder()), Some(field));
        }
        assert_eq!(ProfileField::from_placeholder("email"), None);
    }
}
