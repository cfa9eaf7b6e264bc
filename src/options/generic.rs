use serde::{Deserialize, Serialize};

use super::clamp_slider;

/// Options shared by the people and general domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenericOptions {
    pub strength: i32,
    pub strict_preservation: bool,
}

impl Default for GenericOptions {
    fn default() -> Self {
        Self {
            strength: 60,
            strict_preservation: true,
        }
    }
}

impl GenericOptions {
    pub fn normalized(self) -> Self {
        Self {
            strength: clamp_slider("strength", self.strength, 0, 100),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_above_range_is_clamped() {
        let options: GenericOptions =
            serde_json::from_str(r#"{"strength":140,"strictPreservation":false}"#).unwrap();
        assert_eq!(options.normalized().strength, 100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<GenericOptions>(
            r#"{"strength":40,"strictPreservation":true,"sharpen":true}"#,
        );
        assert!(result.is_err());
    }
}
