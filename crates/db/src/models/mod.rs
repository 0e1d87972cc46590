//! Row models and request DTOs, one module per table.

pub mod blog_post;
pub mod photo;
pub mod pricing;
pub mod quote;
pub mod reserved_date;
pub mod session;
pub mod story;
pub mod user;
pub mod video;
pub mod wedding;

/// Turn an empty or whitespace-only optional field into `None`.
///
/// Admin forms submit blank inputs as empty strings; they are stored as NULL.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" Joinville ".into())), Some("Joinville".into()));
    }
}
