//! vCard 3.0 export of a profile.
//!
//! Both exports are pure functions of the profile: fields that are absent or
//! blank are left out entirely, lines are joined with `\n` and there is no
//! trailing newline.

use serde::{Deserialize, Serialize};

use crate::models::Profile;

pub const MIME_TYPE: &str = "text/vcard; charset=utf-8";

/// Which export to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Identity and contact details only
    Contact,
    /// Contact details plus bio, social links and skill summaries
    #[default]
    Portfolio,
}

impl Variant {
    pub fn render(self, profile: &Profile) -> String {
        match self {
            Variant::Contact => contact_card(profile),
            Variant::Portfolio => portfolio_card(profile),
        }
    }
}

/// Contact card: name, title, organisation, address, email, phone and website.
pub fn contact_card(profile: &Profile) -> String {
    Builder::new(profile).finish()
}

/// Contact card extended with the bio, social links and NOTE summaries of
/// skills, experience, specializations, languages, certifications and awards.
pub fn portfolio_card(profile: &Profile) -> String {
    let mut card = Builder::new(profile);

    card.optional("NOTE", profile.bio.as_deref());
    for (_, url) in profile.social_links() {
        card.optional("URL", Some(url));
    }

    card.summary("Compétences", &profile.skills);
    if let Some(years) = profile.years_of_experience.filter(|y| *y > 0) {
        card.line("NOTE", &format!("{} années d'expérience", years));
    }
    card.summary("Spécialisations", &profile.specializations);
    card.summary("Langues", &profile.languages);
    card.summary("Certifications", &profile.certifications);
    card.summary("Récompenses", &profile.awards);

    card.finish()
}

/// Download name for a profile's card.
///
/// Whitespace runs become `_`, as do path separators, control characters and
/// a leading dot, so the result is always a single plain file name.
pub fn file_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    let mut stem: String = joined
        .chars()
        .map(|c| if is_unsafe_in_file_name(c) { '_' } else { c })
        .collect();
    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }
    if stem.is_empty() {
        "contact.vcf".to_string()
    } else {
        format!("{}.vcf", stem)
    }
}

fn is_unsafe_in_file_name(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

struct Builder {
    lines: Vec<String>,
}

impl Builder {
    fn new(profile: &Profile) -> Self {
        let mut builder = Self {
            lines: vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()],
        };

        builder.line("FN", &profile.name);
        builder.line("TITLE", &profile.profession);
        builder.optional("ORG", profile.company.as_deref());
        if let Some(address) = present(profile.address.as_deref()) {
            builder.line("ADR", &format!(";;{};;;", address));
        }
        builder.optional("EMAIL", profile.email.as_deref());
        builder.optional("TEL", profile.phone.as_deref());
        builder.optional("URL", profile.website.as_deref());

        builder
    }

    fn line(&mut self, property: &str, value: &str) {
        self.lines.push(format!("{}:{}", property, single_line(value)));
    }

    fn optional(&mut self, property: &str, value: Option<&str>) {
        if let Some(value) = present(value) {
            self.line(property, value);
        }
    }

    fn summary(&mut self, label: &str, items: &[String]) {
        let items: Vec<&str> = items
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect();
        if !items.is_empty() {
            self.line("NOTE", &format!("{}: {}", label, items.join(", ")));
        }
    }

    fn finish(&mut self) -> String {
        self.lines.push("END:VCARD".to_string());
        self.lines.join("\n")
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Keep every property on one physical line
fn single_line(value: &str) -> String {
    value.replace("\r\n", "\\n").replace(['\r', '\n'], "\\n")
}
