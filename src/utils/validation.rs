use validator::ValidationError;

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_entry"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_blank() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank(" x ").is_ok());
    }

    #[test]
    fn list_rejects_blank_items() {
        assert!(no_blank_entries(&["rust".into(), "".into()]).is_err());
        assert!(no_blank_entries(&[]).is_ok());
    }
}
