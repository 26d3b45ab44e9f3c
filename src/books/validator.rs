use crate::books::dto::{BookDto, BookUpdateDto};

// BookValidator decides whether create and update requests are admissible.
pub(crate) trait BookValidator: Sync + Send {
    // a new book must not carry an isbn, the store assigns it
    fn is_available_for_create(&self, book: &BookDto) -> bool;

    // merges the non-blank fields of the request that differ from the target into it,
    // returns false when nothing changed. The request isbn only locates the target.
    fn is_available_for_update(&self, req: &BookUpdateDto, target: &mut BookDto) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FieldBookValidator {}

impl FieldBookValidator {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

impl BookValidator for FieldBookValidator {
    fn is_available_for_create(&self, book: &BookDto) -> bool {
        book.isbn.is_none()
    }

    fn is_available_for_update(&self, req: &BookUpdateDto, target: &mut BookDto) -> bool {
        let mut changed = false;
        if let Some(name) = non_blank(&req.name) {
            if name != target.name {
                target.name = name.to_string();
                changed = true;
            }
        }
        changed |= merge(&req.author, &mut target.author);
        changed |= merge(&req.publisher, &mut target.publisher);
        changed |= merge(&req.language, &mut target.language);
        changed
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn merge(value: &Option<String>, field: &mut Option<String>) -> bool {
    match non_blank(value) {
        Some(v) if field.as_deref() != Some(v) => {
            *field = Some(v.to_string());
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::{BookDto, BookUpdateDto};
    use crate::books::validator::{BookValidator, FieldBookValidator};

    #[tokio::test]
    async fn test_should_allow_create_without_isbn() {
        let validator = FieldBookValidator::new();
        let mut book = BookDto::new("Dune");
        assert!(validator.is_available_for_create(&book));
        book.isbn = Some(42);
        assert!(!validator.is_available_for_create(&book));
    }

    #[tokio::test]
    async fn test_should_merge_changed_fields() {
        let validator = FieldBookValidator::new();
        let mut target = BookDto::new("Dune");
        target.isbn = Some(42);
        let req = BookUpdateDto {
            isbn: Some(42),
            author: Some(" Frank Herbert ".to_string()),
            language: Some("en".to_string()),
            ..Default::default()
        };
        assert!(validator.is_available_for_update(&req, &mut target));
        assert_eq!(Some("Frank Herbert"), target.author.as_deref());
        assert_eq!(Some("en"), target.language.as_deref());
        assert_eq!("Dune", target.name.as_str());
        assert_eq!(Some(42), target.isbn);
    }

    #[tokio::test]
    async fn test_should_rename_book() {
        let validator = FieldBookValidator::new();
        let mut target = BookDto::new("Dune");
        let req = BookUpdateDto { isbn: Some(1), name: Some("Dune Messiah".to_string()), ..Default::default() };
        assert!(validator.is_available_for_update(&req, &mut target));
        assert_eq!("Dune Messiah", target.name.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_update_without_changes() {
        let validator = FieldBookValidator::new();
        let mut target = BookDto::new("Dune").with_author("Frank Herbert");
        let before = target.clone();

        assert!(!validator.is_available_for_update(&BookUpdateDto::by_isbn(42), &mut target));
        assert!(!validator.is_available_for_update(&BookUpdateDto::by_name("Dune"), &mut target));
        let blank = BookUpdateDto { author: Some("   ".to_string()), publisher: Some("".to_string()), ..Default::default() };
        assert!(!validator.is_available_for_update(&blank, &mut target));
        let same = BookUpdateDto { author: Some("Frank Herbert".to_string()), ..Default::default() };
        assert!(!validator.is_available_for_update(&same, &mut target));
        assert_eq!(before, target);
    }
}
