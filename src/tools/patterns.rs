//! Trigger phrase tables for the built-in tools.
//!
//! Each tool lists its natural-language triggers in priority order; only the
//! first one that matches is reported. The `context` pattern is matched
//! against recent conversation history to rank tools the user keeps coming
//! back to. All patterns are compiled case-insensitively.

use crate::types::ToolId;

/// Static description of one tool, compiled into a `ToolDefinition` at startup.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub id: ToolId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub triggers: &'static [&'static str],
    pub context: &'static str,
}

/// Built-in tools, in registry (tie-break) order.
pub const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        id: ToolId::ComprehensiveSecurity,
        display_name: "Comprehensive Security Scan",
        description: "Runs every check at once and summarises the user's overall exposure.",
        triggers: &[
            r"\b(full|complete|comprehensive|overall|entire|total)\s+(security|privacy|digital)\s+(check|scan|audit|review|checkup|check-up|assessment)",
            r"\bhow\s+(secure|safe|protected|exposed)\s+am\s+i\b",
            r"\b(scan|check|audit)\s+(everything|it\s+all|all\s+of\s+(it|my\s+accounts))",
            r"\b(digital\s+footprint|online\s+(presence|exposure))",
            r"\bsecurity\s+(check|scan|audit|checkup|check-up|review)\b",
        ],
        context: r"\b(comprehensive|full\s+scan|everything|overall|footprint|all\s+my\s+accounts)\b",
    },
    ToolSpec {
        id: ToolId::PasswordChecker,
        display_name: "Password Strength Checker",
        description: "Estimates how long a password would survive a guessing attack.",
        triggers: &[
            r"\b(is|are)\s+my\s+pass(word|phrase|code)s?\s+(safe|secure|strong|good|ok|okay)",
            r"\bhow\s+(strong|secure|safe|good)\s+is\s+my\s+pass(word|phrase|code)",
            r"\b(check|test|analy[sz]e|rate|evaluate|verify)\b.*\bpass(word|phrase|code)s?\b",
            r"\bpass(word|phrase|code)s?\b.*\b(strength|strong|weak|crack|guess)",
            r"\bpass(word|phrase|code)s?\b",
        ],
        context: r"\bpass(word|phrase|code)s?\b",
    },
    ToolSpec {
        id: ToolId::EmailBreach,
        display_name: "Email Breach Scanner",
        description: "Looks an email address up in known breach collections.",
        triggers: &[
            r"\b(has|have|was|were|is)\b.*\b(e-?mail|account)s?\b.*\b(breach|breached|pwned|leak|leaked|compromised|hacked|exposed)\b",
            r"\b(breach|breached|pwned|leak|leaked|compromised|hacked)\b.*\be-?mails?\b",
            r"\be-?mails?\b.*\b(breach|breached|breaches|pwned|leak|leaked|compromised|hacked|exposed|dark\s*web)",
            r"\bdata\s+breach(es)?\b",
            r"\b(have\s+i\s+been\s+pwned|haveibeenpwned)",
        ],
        context: r"\b(e-?mails?|breach(es|ed)?|pwned|leak(s|ed)?|inbox)\b",
    },
    ToolSpec {
        id: ToolId::AreaCodeChecker,
        display_name: "Phone Number & Area Code Checker",
        description: "Flags phone numbers and area codes associated with scam campaigns.",
        triggers: &[
            r"\b(scam|spam|fraud|robo)\w*\s+(call|caller|number|text)s?\b",
            r"\barea\s+code\b",
            r"\bwho\s+(is\s+calling|called|keeps\s+calling|texted)\b",
            r"\b(unknown|suspicious|strange|weird)\s+(number|caller|call|text)s?\b",
            r"\bphone\s+number\b",
            r"\bcall(ed|ing)?\s+(me\s+)?from\b",
        ],
        context: r"\b(phone|calls?|caller|area\s+code|robocalls?|texts?)\b",
    },
    ToolSpec {
        id: ToolId::DataBrokerScan,
        display_name: "Data Broker Exposure Scan",
        description: "Searches people-search and data broker sites for the user's profile.",
        triggers: &[
            r"\bdata\s+brokers?\b",
            r"\bpeople[\s-]+search\b",
            r"\b(who\s+is\s+selling|sell(s|ing)?)\s+my\s+(data|info|information|details)",
            r"\b(remove|delete|opt\s+out)\b.*\b(info|information|data|details)\b.*\b(online|internet|web|sites?)\b",
            r"\bmy\s+(personal\s+)?(info|information|data|address|details)\s+(online|on\s+the\s+internet|exposed|public)",
            r"\bwhat\s+(do|does)\s+(the\s+)?(internet|google|websites?)\s+know\s+about\s+me\b",
        ],
        context: r"\b(data\s+brokers?|people\s+search|personal\s+info(rmation)?|opt[\s-]out|exposure)\b",
    },
    ToolSpec {
        id: ToolId::NetworkScanner,
        display_name: "Network Vulnerability Scanner",
        description: "Simulates a scan of the home network for open ports and weak devices.",
        triggers: &[
            r"\b(scan|check|test|audit|secure)\b.*\b(network|wi-?fi|router)\b",
            r"\b(network|wi-?fi|router)\b.*\b(secure|safe|vulnerab\w*|hacked|intrusion|open\s+ports?)",
            r"\bopen\s+ports?\b",
            r"\bport\s+scan",
            r"\b(someone|anyone|neighbou?rs?)\b.*\b(on|using|stealing)\s+my\s+(wi-?fi|network|internet)\b",
        ],
        context: r"\b(network|wi-?fi|router|ports?|firewall|ip\s+address)\b",
    },
    ToolSpec {
        id: ToolId::FileScanner,
        display_name: "File & Download Scanner",
        description: "Simulates a malware scan of a file or download.",
        triggers: &[
            r"\b(scan|check|analy[sz]e|test)\b.*\b(file|download|attachment|document|pdf|exe)s?\b",
            r"\b(file|download|attachment|document)s?\b.*\b(safe|virus|malware|infected|malicious|trojan)",
            r"\b(virus|malware|trojan|ransomware)\b",
            r"\bis\s+(this|it)\s+(file|attachment|download)\b",
        ],
        context: r"\b(files?|downloads?|attachments?|virus|malware)\b",
    },
];

