use log::{debug, trace};

use crate::{Result, TodoError};

/// Display name used when no wallet address is available
pub const ANONYMOUS: &str = "anonymous";

/// Number of leading address characters kept when shortening, and the
/// prefix length the `mine` filter matches on
const PREFIX_LEN: usize = 6;
const SUFFIX_LEN: usize = 4;

/// Identity of whoever is performing an operation.
///
/// Wraps the caller's wallet address, if any. The store only ever sees the
/// derived display string and the address prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    address: Option<String>,
}

impl Actor {
    /// Builds an actor from an optional address; an empty address counts as none
    pub fn new(address: Option<String>) -> Self {
        let address = address.filter(|a| !a.is_empty());
        trace!("Resolved actor address: {:?}", address);
        Actor { address }
    }

    pub fn anonymous() -> Self {
        Actor { address: None }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// `first6...last4` of the address, or `anonymous`
    pub fn display(&self) -> String {
        match &self.address {
            Some(address) => shorten_address(address),
            None => ANONYMOUS.to_string(),
        }
    }

    /// The leading characters of the address used for ownership matching
    pub fn address_prefix(&self) -> Option<String> {
        self.address
            .as_ref()
            .map(|a| a.chars().take(PREFIX_LEN).collect())
    }
}

/// Shortens an address to `first6...last4`.
///
/// Works on chars, so short inputs overlap rather than panic.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(PREFIX_LEN).collect();
    let tail: String = chars[chars.len().saturating_sub(SUFFIX_LEN)..]
        .iter()
        .collect();
    format!("{}...{}", head, tail)
}

/// Trims a title and rejects it if nothing is left
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        debug!("Rejected blank title");
        return Err(TodoError::InvalidInput {
            message: "Title cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Rejects comments that are blank; the text itself is kept verbatim
pub fn validate_comment(text: &str) -> Result<&str> {
    if text.trim().is_empty() {
        debug!("Rejected blank comment");
        return Err(TodoError::InvalidInput {
            message: "Comment cannot be empty".to_string(),
        });
    }
    Ok(text)
}
