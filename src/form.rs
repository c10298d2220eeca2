//! Contact form submission.
//!
//! There is no network call. Submitting with a non-empty name, email and
//! message shows an acknowledgement prompt and clears the form; anything else
//! shows a validation prompt and leaves the fields as typed.

use crate::dom::{Document, NodeId};
use thiserror::Error;
use tracing::{debug, info};

pub const SENT_PROMPT: &str = "Message sent!";
pub const INCOMPLETE_PROMPT: &str = "Please fill all fields";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Check that all three fields are non-empty.
pub fn validate(name: &str, email: &str, message: &str) -> Result<ContactMessage, FormError> {
    let missing: Vec<_> = [("name", name), ("email", email), ("message", message)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
    if !missing.is_empty() {
        return Err(FormError::MissingFields(missing));
    }
    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
struct FormParts {
    form: NodeId,
    name: NodeId,
    email: NodeId,
    message: NodeId,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    parts: Option<FormParts>,
}

impl ContactForm {
    /// Bind to the first `.contact-form`: its first `<input>` is the name,
    /// its `input[type=email]` the email and its `<textarea>` the message.
    /// Any missing piece disables the handler.
    pub fn attach<D: Document>(doc: &D) -> Self {
        let parts = doc
            .elements_by_class("contact-form")
            .into_iter()
            .next()
            .and_then(|form| {
                let inputs = doc.descendants_by_tag(form, "input");
                let name = *inputs.first()?;
                let email = inputs
                    .iter()
                    .copied()
                    .find(|&i| doc.attribute(i, "type").as_deref() == Some("email"))?;
                let message = *doc.descendants_by_tag(form, "textarea").first()?;
                Some(FormParts {
                    form,
                    name,
                    email,
                    message,
                })
            });
        if parts.is_some() {
            debug!("contact form handler set");
        }
        Self { parts }
    }

    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    pub fn form(&self) -> Option<NodeId> {
        self.parts.map(|p| p.form)
    }

    /// Handle a submit. Returns `None` when the form is absent.
    pub fn submit<D: Document>(&self, doc: &mut D) -> Option<Result<ContactMessage, FormError>> {
        let parts = self.parts?;
        let result = validate(
            &doc.value(parts.name),
            &doc.value(parts.email),
            &doc.value(parts.message),
        );
        match &result {
            Ok(message) => {
                info!(from = %message.email, "contact message accepted");
                doc.alert(SENT_PROMPT);
                self.reset(doc, parts.form);
            }
            Err(err) => {
                debug!(%err, "contact form incomplete");
                doc.alert(INCOMPLETE_PROMPT);
            }
        }
        Some(result)
    }

    fn reset<D: Document>(&self, doc: &mut D, form: NodeId) {
        let fields = doc
            .descendants_by_tag(form, "input")
            .into_iter()
            .chain(doc.descendants_by_tag(form, "textarea"));
        for field in fields.collect::<Vec<_>>() {
            doc.set_value(field, "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new(800.0);
        let body = doc.body();
        let form = doc.append(body, Element::new("form").with_class("contact-form"));
        doc.append(form, Element::new("input").with_id("name").with_attr("type", "text"));
        doc.append(form, Element::new("input").with_id("email").with_attr("type", "email"));
        doc.append(form, Element::new("textarea").with_id("message"));
        doc
    }

    fn fill(doc: &mut MemoryDocument, name: &str, email: &str, message: &str) {
        for (id, value) in [("name", name), ("email", email), ("message", message)] {
            let node = doc.element_by_id(id).unwrap();
            doc.set_value(node, value);
        }
    }

    #[test]
    fn validate_reports_missing_fields() {
        assert_eq!(
            validate("Ada", "", ""),
            Err(FormError::MissingFields(vec!["email", "message"]))
        );
        assert!(validate("Ada", "ada@example.com", "Hi").is_ok());
    }

    #[test]
    fn missing_fields_error_message() {
        let err = validate("", "", "x").unwrap_err();
        assert_eq!(err.to_string(), "missing fields: name, email");
    }

    #[test]
    fn valid_submit_acknowledges_and_resets() {
        let mut doc = page();
        let form = ContactForm::attach(&doc);
        fill(&mut doc, "Ada", "ada@example.com", "Hello");
        let result = form.submit(&mut doc).unwrap();
        assert_eq!(result.unwrap().name, "Ada");
        assert_eq!(doc.alerts(), [SENT_PROMPT.to_string()]);
        assert_eq!(doc.element_with_id("email").unwrap().value, "");
        assert_eq!(doc.element_with_id("message").unwrap().value, "");
    }

    #[test]
    fn incomplete_submit_prompts_and_keeps_values() {
        let mut doc = page();
        let form = ContactForm::attach(&doc);
        fill(&mut doc, "Ada", "", "Hello");
        assert!(form.submit(&mut doc).unwrap().is_err());
        assert_eq!(doc.alerts(), [INCOMPLETE_PROMPT.to_string()]);
        assert_eq!(doc.element_with_id("name").unwrap().value, "Ada");
    }

    #[test]
    fn form_without_email_input_is_disabled() {
        let mut doc = MemoryDocument::new(800.0);
        let body = doc.body();
        let form = doc.append(body, Element::new("form").with_class("contact-form"));
        doc.append(form, Element::new("input"));
        doc.append(form, Element::new("textarea"));
        let handler = ContactForm::attach(&doc);
        assert!(!handler.is_enabled());
        assert!(handler.submit(&mut doc).is_none());
        assert!(doc.alerts().is_empty());
    }
}
