use super::records::StaticPageRecord;

/// Site pages offered by the command palette, in the order they are previewed.
pub static STATIC_PAGES: &[StaticPageRecord] = &[
    StaticPageRecord {
        title: "Home",
        description: "Overview of the ARA certification programme",
        url: "/",
    },
    StaticPageRecord {
        title: "Standard v1.0",
        description: "Full text of the current standard",
        url: "/standard/v1.0",
    },
    StaticPageRecord {
        title: "Control Library",
        description: "Browse and filter every control by domain, level and method",
        url: "/standard/v1.0/acr",
    },
    StaticPageRecord {
        title: "Certification Registry",
        description: "Look up certified systems and their monitoring status",
        url: "/registry",
    },
    StaticPageRecord {
        title: "Certification Process",
        description: "Levels, evaluation methods and the path to certification",
        url: "/certification",
    },
    StaticPageRecord {
        title: "Badges",
        description: "Embed a verifiable certification badge",
        url: "/badges",
    },
    StaticPageRecord {
        title: "Changelog",
        description: "Revisions to the standard since its first publication",
        url: "/standard/changelog",
    },
    StaticPageRecord {
        title: "FAQ",
        description: "Answers to common questions from applicants",
        url: "/faq",
    },
    StaticPageRecord {
        title: "Contact",
        description: "Reach the certification office",
        url: "/contact",
    },
];
