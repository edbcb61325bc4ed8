//! Order links
//!
//! Orders are handed to the restaurant as a WhatsApp deep link carrying the order message.

use url::form_urlencoded::byte_serialize;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Percent-encode a message for a `wa.me` link.
///
/// Spaces become `%20` and newlines `%0A`.
pub fn encode_message(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Builds deep links that open a chat with the restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    phone: String,
}

impl WhatsAppLink {
    /// Create a link builder for the given phone number.
    ///
    /// Anything that is not a digit, such as `+` or spaces, is dropped.
    pub fn new(phone: &str) -> Self {
        Self {
            phone: phone.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    /// Number the links point at.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Deep link pre-filled with `message`.
    pub fn for_message(&self, message: &str) -> String {
        format!(
            "{WHATSAPP_BASE}/{}?text={}",
            self.phone,
            encode_message(message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_newlines_are_encoded() {
        assert_eq!(
            encode_message("Nombre: Ana\nTotal: S/. 10.00"),
            "Nombre%3A%20Ana%0ATotal%3A%20S%2F.%2010.00"
        );
    }

    #[test]
    fn literal_plus_survives() {
        assert_eq!(encode_message("1+1"), "1%2B1");
    }

    #[test]
    fn phone_keeps_digits_only() {
        let link = WhatsAppLink::new("+51 934 629 203");

        assert_eq!(link.phone(), "51934629203");
        assert_eq!(
            link.for_message("*Nuevo Pedido*"),
            "https://wa.me/51934629203?text=*Nuevo%20Pedido*"
        );
    }

    #[test]
    fn accents_are_utf8_encoded() {
        assert_eq!(encode_message("Teléfono"), "Tel%C3%A9fono");
    }
}
