use serde::{Deserialize, Serialize};

/// Which resolution strategy produced a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    Gazetteer,
    Pattern,
    Model,
    None,
}

impl std::fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionMethod::Gazetteer => write!(f, "gazetteer"),
            ResolutionMethod::Pattern => write!(f, "pattern"),
            ResolutionMethod::Model => write!(f, "model"),
            ResolutionMethod::None => write!(f, "none"),
        }
    }
}

/// A location extracted from free text, with the method that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    pub location: Option<String>,
    pub method: ResolutionMethod,
}

impl ResolvedLocation {
    #[must_use]
    pub fn found(location: impl Into<String>, method: ResolutionMethod) -> Self {
        Self {
            location: Some(location.into()),
            method,
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            location: None,
            method: ResolutionMethod::None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }

    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
