//! Backend agent routing identities.
//!
//! Metadata events name which specialist agent the backend routed the query
//! to. The widget shows the agent as a badge next to assistant messages,
//! except for the general agent which gets no badge.

use std::fmt;

/// The backend agent handling the current conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Agent {
    Civil,
    Familia,
    Penal,
    PenalJuvenil,
    NnaPcr,
    General,
    /// An agent name this client does not know; the raw name is kept so the
    /// badge can still show something meaningful.
    Other(String),
}

impl Agent {
    /// Parse the agent name as sent by the backend.
    pub fn parse(name: &str) -> Self {
        match name {
            "civil" => Agent::Civil,
            "familia" => Agent::Familia,
            "penal" => Agent::Penal,
            "penal_juvenil" => Agent::PenalJuvenil,
            "nna_pcr" => Agent::NnaPcr,
            "general" => Agent::General,
            other => Agent::Other(other.to_string()),
        }
    }

    /// Human-readable badge label, or None when no badge should be shown.
    pub fn badge_label(&self) -> Option<&str> {
        match self {
            Agent::Civil => Some("Civil"),
            Agent::Familia => Some("Familia"),
            Agent::Penal => Some("Penal"),
            Agent::PenalJuvenil => Some("Penal Juvenil"),
            Agent::NnaPcr => Some("NNA/PCR"),
            Agent::General => None,
            Agent::Other(name) => Some(name),
        }
    }

    /// The wire name as sent by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            Agent::Civil => "civil",
            Agent::Familia => "familia",
            Agent::Penal => "penal",
            Agent::PenalJuvenil => "penal_juvenil",
            Agent::NnaPcr => "nna_pcr",
            Agent::General => "general",
            Agent::Other(name) => name,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
