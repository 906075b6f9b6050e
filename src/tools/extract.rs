//! Parameter extractors — pull pre-fill hints (email, phone, quoted password,
//! name, ...) out of a raw chat message.
//!
//! Each tool gets a fixed combination of extractors, chosen by matching on its
//! `ToolId`, so adding a tool without deciding what it extracts is a compile
//! error rather than a runtime surprise.

use crate::error::{DetectError, Result};
use crate::types::{ExtractedParameters, ToolId};
use regex::{Regex, RegexBuilder};

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

/// Group 1 is the whole number, group 2 the area code.
const PHONE_PATTERN: &str =
    r"(?:^|[^\d])((?:\+?1[\s.-]?)?\(?(\d{3})\)?[\s.-]?\d{3}[\s.-]?\d{4})(?:$|[^\d])";

const QUOTED_PATTERN: &str = r#"["“”`]([^"“”`\r\n]{1,128})["“”`]"#;

/// Single quotes only count when they stand alone, so "what's" never opens one.
const SINGLE_QUOTED_PATTERN: &str = r"(?:^|\s)'([^'\s]{1,128})'(?:$|[\s.,!?;:])";

/// Only the lead-in is case-insensitive; the name itself must be capitalised.
const NAME_PATTERN: &str =
    r"(?i:\bmy\s+name\s+is|\bi'm|\bi\s+am|\bthis\s+is)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})";

const IPV4_PATTERN: &str = r"\b((?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(?:\.(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)){3})\b";

/// Greedy over dots so a disguised double extension keeps its last (listed) part.
const FILE_NAME_PATTERN: &str = r"\b([\w.-]*\w\.(?:exe|msi|dmg|pkg|apk|zip|rar|7z|iso|jar|bat|scr|js|pdf|docx?|xlsx?|pptx?))\b";

/// Compiled extractor regexes, shared by every tool in the registry.
#[derive(Debug)]
pub struct Extractors {
    email: Regex,
    phone: Regex,
    quoted: Regex,
    single_quoted: Regex,
    name: Regex,
    ipv4: Regex,
    file_name: Regex,
}

impl Extractors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: compile("email", EMAIL_PATTERN, false)?,
            phone: compile("phone", PHONE_PATTERN, false)?,
            quoted: compile("quoted", QUOTED_PATTERN, false)?,
            single_quoted: compile("single_quoted", SINGLE_QUOTED_PATTERN, false)?,
            name: compile("name", NAME_PATTERN, false)?,
            ipv4: compile("ipv4", IPV4_PATTERN, false)?,
            file_name: compile("file_name", FILE_NAME_PATTERN, true)?,
        })
    }

    /// Run the extractors that belong to `tool` over `text`.
    pub fn extract(&self, tool: ToolId, text: &str) -> ExtractedParameters {
        match tool {
            ToolId::ComprehensiveSecurity => {
                let (phone, area_code) = self.phone(text).unzip();
                ExtractedParameters {
                    suggested_email: self.email(text),
                    suggested_phone: phone,
                    suggested_area_code: area_code,
                    suggested_name: self.name(text),
                    ..Default::default()
                }
            }
            ToolId::PasswordChecker => ExtractedParameters {
                suggested_password: self.password(text),
                ..Default::default()
            },
            ToolId::EmailBreach => ExtractedParameters {
                suggested_email: self.email(text),
                ..Default::default()
            },
            ToolId::AreaCodeChecker => {
                let (phone, area_code) = self.phone(text).unzip();
                ExtractedParameters {
                    suggested_phone: phone,
                    suggested_area_code: area_code,
                    ..Default::default()
                }
            }
            ToolId::DataBrokerScan => ExtractedParameters {
                suggested_name: self.name(text),
                suggested_email: self.email(text),
                ..Default::default()
            },
            ToolId::NetworkScanner => ExtractedParameters {
                suggested_address: self.ipv4(text),
                ..Default::default()
            },
            ToolId::FileScanner => ExtractedParameters {
                suggested_file_name: self.file_name(text),
                ..Default::default()
            },
        }
    }

    pub fn email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    /// Returns `(number as written, area code)`.
    pub fn phone(&self, text: &str) -> Option<(String, String)> {
        let caps = self.phone.captures(text)?;
        let number = caps.get(1)?.as_str().trim().to_string();
        let area_code = caps.get(2)?.as_str().to_string();
        Some((number, area_code))
    }

    /// Quoted text is the only thing treated as a candidate password.
    pub fn password(&self, text: &str) -> Option<String> {
        let double = self.quoted.captures(text).and_then(|c| c.get(1));
        let single = self.single_quoted.captures(text).and_then(|c| c.get(1));

        // Whichever quote style appears first in the message wins.
        match (double, single) {
            (Some(d), Some(s)) if s.start() < d.start() => Some(s.as_str().to_string()),
            (Some(d), _) => Some(d.as_str().to_string()),
            (None, Some(s)) => Some(s.as_str().to_string()),
            (None, None) => None,
        }
    }

    pub fn name(&self, text: &str) -> Option<String> {
        self.name
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn ipv4(&self, text: &str) -> Option<String> {
        self.ipv4
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn file_name(&self, text: &str) -> Option<String> {
        self.file_name
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

fn compile(label: &str, pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| DetectError::Pattern {
            tool: format!("extractor:{label}"),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractors() -> Extractors {
        Extractors::new().expect("extractor patterns compile")
    }

    #[test]
    fn email_is_pulled_from_sentence() {
        let ex = extractors();
        assert_eq!(
            ex.email("Has my email john@example.com been breached?").as_deref(),
            Some("john@example.com")
        );
        assert_eq!(
            ex.email("write to jane.doe+alerts@mail.co.uk.").as_deref(),
            Some("jane.doe+alerts@mail.co.uk")
        );
        assert_eq!(ex.email("no address here"), None);
    }

    #[test]
    fn phone_and_area_code() {
        let ex = extractors();
        let (number, area) = ex.phone("Is 415-555-0100 a scam number?").unwrap();
        assert_eq!(number, "415-555-0100");
        assert_eq!(area, "415");

        let (number, area) = ex.phone("they called from +1 (212) 555.7788 twice").unwrap();
        assert_eq!(number, "+1 (212) 555.7788");
        assert_eq!(area, "212");

        assert_eq!(ex.phone("call me at 555-0100"), None);
        assert_eq!(ex.phone("order 123456789012 shipped"), None);
    }

    #[test]
    fn password_needs_quotes() {
        let ex = extractors();
        assert_eq!(
            ex.password(r#"Check "Tr0ub4dor&3" password strength"#).as_deref(),
            Some("Tr0ub4dor&3")
        );
        assert_eq!(
            ex.password("is 'hunter2' a good password?").as_deref(),
            Some("hunter2")
        );
        assert_eq!(ex.password("Is my password safe?"), None);
        assert_eq!(ex.password("what's the deal with my password's length?"), None);
    }

    #[test]
    fn name_requires_capitalised_words() {
        let ex = extractors();
        assert_eq!(
            ex.name("Hi, my name is Jane Doe and I want to check brokers").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(ex.name("I'm Sam").as_deref(), Some("Sam"));
        assert_eq!(ex.name("I am worried about my data"), None);
    }

    #[test]
    fn ipv4_and_file_names() {
        let ex = extractors();
        assert_eq!(
            ex.ipv4("scan my router at 192.168.1.1 please").as_deref(),
            Some("192.168.1.1")
        );
        assert_eq!(ex.ipv4("version 300.1.1.1"), None);
        assert_eq!(
            ex.file_name("is invoice_2024.PDF safe to open?").as_deref(),
            Some("invoice_2024.PDF")
        );
        assert_eq!(
            ex.file_name("Is invoice.pdf.exe a virus?").as_deref(),
            Some("invoice.pdf.exe")
        );
        assert_eq!(
            ex.file_name("open report.pdf.").as_deref(),
            Some("report.pdf")
        );
        assert_eq!(ex.file_name("visit example.com"), None);
    }

    #[test]
    fn each_tool_only_fills_its_own_fields() {
        let ex = extractors();
        let text = r#"My name is Jane Doe, email jane@example.com, phone 415-555-0100, password "abc""#;

        let email = ex.extract(ToolId::EmailBreach, text);
        assert_eq!(email.suggested_email.as_deref(), Some("jane@example.com"));
        assert_eq!(email.suggested_phone, None);
        assert_eq!(email.suggested_password, None);

        let all = ex.extract(ToolId::ComprehensiveSecurity, text);
        assert_eq!(all.suggested_name.as_deref(), Some("Jane Doe"));
        assert_eq!(all.suggested_area_code.as_deref(), Some("415"));
        assert_eq!(all.suggested_password, None);

        let network = ex.extract(ToolId::NetworkScanner, text);
        assert!(network.is_empty());
    }
}
