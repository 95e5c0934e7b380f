use crate::i18n::Translations;

/// Public address of the published chart.
pub const SITE_URL: &str = "http://bac-225.adminhq.cf/";
/// Where the figures come from.
pub const SOURCE_URL: &str = "https://www.exemple-source.com";

/// One share target: label + fully encoded link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub label: &'static str,
    pub url: String,
}

/// Share links for the active language, in display order.
pub fn share_links(tr: &Translations) -> Vec<ShareLink> {
    let title = urlencoding::encode(tr.main_title);
    vec![
        ShareLink {
            label: tr.twitter_text,
            url: format!("https://twitter.com/intent/tweet?text={title}&url={SITE_URL}"),
        },
        ShareLink {
            label: tr.facebook_text,
            url: format!("https://www.facebook.com/sharer/sharer.php?u={SITE_URL}"),
        },
        ShareLink {
            label: tr.linkedin_text,
            url: format!(
                "https://www.linkedin.com/shareArticle?mini=true&url={SITE_URL}&title={title}"
            ),
        },
        ShareLink {
            label: tr.mail_text,
            url: format!(
                "mailto:?subject={}&body={}",
                urlencoding::encode(tr.mail_subject),
                urlencoding::encode(tr.mail_body)
            ),
        },
    ]
}
