//! WhatsApp deep links used by the public site.
//!
//! Links have the form `https://wa.me/<number>?text=<url-encoded message>`.

/// Studio number used when `WHATSAPP_NUMBER` is not configured.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "554732096098";

const BASE_URL: &str = "https://wa.me";

const STUDIO_NAME: &str = "Racun Weddings";

/// Fields of the contact form embedded in the submission message.
#[derive(Debug, Clone, Copy)]
pub struct ContactDetails<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub date: &'a str,
    pub city: &'a str,
    pub message: &'a str,
}

/// Builds deep links for one studio number.
#[derive(Debug, Clone)]
pub struct WhatsAppLinks {
    number: String,
}

impl Default for WhatsAppLinks {
    fn default() -> Self {
        Self::new(DEFAULT_WHATSAPP_NUMBER)
    }
}

impl WhatsAppLinks {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Deep link pre-filled with an arbitrary message.
    pub fn url(&self, message: &str) -> String {
        format!(
            "{BASE_URL}/{}?text={}",
            self.number,
            urlencoding::encode(message)
        )
    }

    /// Generic "I'd like to talk about my wedding" link.
    pub fn general(&self) -> String {
        self.url(&general_message())
    }

    /// Link asking about a specific pricing plan.
    pub fn plan(&self, plan_name: &str) -> String {
        self.url(&plan_message(plan_name))
    }

    /// Link sent after a visitor submits the contact form.
    pub fn form_submission(&self, details: &ContactDetails<'_>) -> String {
        self.url(&form_message(details))
    }
}

pub fn general_message() -> String {
    format!("Olá! Vim pelo site da {STUDIO_NAME} e gostaria de conversar sobre meu casamento.")
}

pub fn plan_message(plan_name: &str) -> String {
    format!(
        "Olá, vim pelo site da {STUDIO_NAME}. Tenho interesse no {plan_name}. \
         Minha data é ___/___/______ e será em __________. \
         O casamento será mais intimista ou uma festa grande? \
         Gostaria de saber sobre disponibilidade e próximos passos."
    )
}

pub fn form_message(details: &ContactDetails<'_>) -> String {
    format!(
        "Olá, sou {}. Vim pelo site da {STUDIO_NAME}.\n\n📅 Data: {}\n📍 Cidade: {}\n📱 WhatsApp: {}\n\n💬 {}",
        details.name, details.date, details.city, details.phone, details.message
    )
}
