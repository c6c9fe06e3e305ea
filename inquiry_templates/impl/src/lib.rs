use std::sync::Arc;

use inquiry_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default)]
pub struct TemplateServiceImpl {
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use inquiry_templates_contracts::{ContactInquiryHtmlTemplate, ContactInquiryTextTemplate};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactInquiryTextTemplate {
                name: "John <Doe>".into(),
                email: "john@example.com".into(),
                phone: "0712345678".into(),
                message: "Hello\nWorld & more".into(),
            })
            .unwrap();

        // Assert
        assert_eq!(
            result.trim_end(),
            "You have received a new message from the contact form.\n\nName:  John <Doe>\nEmail: \
             john@example.com\nPhone: 0712345678\n\nMessage:\nHello\nWorld & more"
        );
    }

    #[test]
    fn html_is_escaped() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactInquiryHtmlTemplate {
                name: "John <script>".into(),
                email: "john@example.com".into(),
                phone: "0712345678".into(),
                message: "Hello\nWorld & <b>more</b>".into(),
            })
            .unwrap();

        // Assert
        assert!(result.contains("<p><strong>Name:</strong> John &lt;script&gt;</p>"));
        assert!(result.contains("<p>Hello<br>World &amp; &lt;b&gt;more&lt;&#x2F;b&gt;</p>"));
        assert!(!result.contains("<script>"));
    }
}
