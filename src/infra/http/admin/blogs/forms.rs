//! Explicit form-field validation for the blog create/edit forms.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::presentation::admin::views::AdminFieldError;

pub(crate) const DATE_INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug)]
pub(super) struct BlogFields {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) date: Date,
}

/// Validate the text fields of a submitted blog form, collecting one message
/// per failing field.
pub(super) fn parse_blog_fields(
    title: &str,
    description: &str,
    date: &str,
) -> Result<BlogFields, Vec<AdminFieldError>> {
    let mut errors = Vec::new();

    let title = title.trim();
    if title.is_empty() {
        errors.push(AdminFieldError::new("Title", "Title is required"));
    }

    let description = description.trim();
    if description.is_empty() {
        errors.push(AdminFieldError::new("Description", "Description is required"));
    }

    let date = date.trim();
    let parsed_date = if date.is_empty() {
        errors.push(AdminFieldError::new("Date", "Date is required"));
        None
    } else {
        match Date::parse(date, DATE_INPUT_FORMAT) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(AdminFieldError::new(
                    "Date",
                    "Date must be a valid date in YYYY-MM-DD format",
                ));
                None
            }
        }
    };

    match parsed_date {
        Some(date) if errors.is_empty() => Ok(BlogFields {
            title: title.to_string(),
            description: description.to_string(),
            date,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn accepts_a_complete_form() {
        let fields =
            parse_blog_fields("Title", "Body", "2024-01-01").expect("valid form must parse");
        assert_eq!(fields.title, "Title");
        assert_eq!(fields.description, "Body");
        assert_eq!(fields.date, date!(2024 - 01 - 01));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let fields =
            parse_blog_fields("  Title  ", " Body ", "2024-01-01").expect("valid form must parse");
        assert_eq!(fields.title, "Title");
        assert_eq!(fields.description, "Body");
    }

    #[test]
    fn collects_one_error_per_missing_field() {
        let errors = parse_blog_fields("", "   ", "").expect_err("blank form must fail");
        let fields: Vec<_> = errors.iter().map(|err| err.field).collect();
        assert_eq!(fields, ["Title", "Description", "Date"]);
    }

    #[test]
    fn rejects_unparseable_dates() {
        let errors = parse_blog_fields("Title", "Body", "01/02/2024").expect_err("bad date");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "Date");
    }
}
