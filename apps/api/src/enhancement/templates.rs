//! Industry templates and option tables used by `EnhancementEngine`.
//! All tables are compile-time constants; nothing here is ever mutated.

use crate::enhancement::context::{Industry, RoleLevel};

/// Verbs, example metrics and buzzwords for one industry.
#[derive(Debug)]
pub struct IndustryTemplate {
    /// Lowercase past-tense verbs, strongest first.
    pub verbs: &'static [&'static str],
    /// Example metrics shown to backends as the shape of a good number.
    pub metrics: &'static [&'static str],
    pub buzzwords: &'static [&'static str],
}

static SOFTWARE: IndustryTemplate = IndustryTemplate {
    verbs: &["engineered", "architected", "deployed", "automated", "optimized"],
    metrics: &[
        "reduced page load time by 40%",
        "cut deployment time from 2 hours to 15 minutes",
        "served 50,000+ daily active users",
    ],
    buzzwords: &["scalable architecture", "CI/CD pipelines", "cloud-native services"],
};

static SALES: IndustryTemplate = IndustryTemplate {
    verbs: &["drove", "negotiated", "closed", "expanded", "secured"],
    metrics: &[
        "exceeded quarterly quota by 25%",
        "closed $1.2M in new business",
        "grew territory revenue 30% year over year",
    ],
    buzzwords: &["consultative selling", "pipeline management", "strategic accounts"],
};

static MARKETING: IndustryTemplate = IndustryTemplate {
    verbs: &["launched", "amplified", "positioned", "grew", "executed"],
    metrics: &[
        "increased organic traffic by 35%",
        "generated 2,000+ qualified leads per quarter",
        "improved email open rates from 18% to 27%",
    ],
    buzzwords: &["data-driven campaigns", "brand positioning", "omnichannel strategy"],
};

static CUSTOMER_SERVICE: IndustryTemplate = IndustryTemplate {
    verbs: &["resolved", "supported", "de-escalated", "retained", "guided"],
    metrics: &[
        "maintained a 95% customer satisfaction score",
        "resolved 60+ inquiries per day",
        "cut average response time by 30%",
    ],
    buzzwords: &["first-contact resolution", "customer retention", "service excellence"],
};

static PROJECT_MANAGEMENT: IndustryTemplate = IndustryTemplate {
    verbs: &["orchestrated", "coordinated", "delivered", "streamlined", "planned"],
    metrics: &[
        "delivered 12 projects on time and under budget",
        "managed a $2M program budget",
        "coordinated a 15-person cross-functional team",
    ],
    buzzwords: &["stakeholder alignment", "risk mitigation", "agile delivery"],
};

static FINANCE: IndustryTemplate = IndustryTemplate {
    verbs: &["analyzed", "forecasted", "reconciled", "audited", "optimized"],
    metrics: &[
        "identified $300K in annual cost savings",
        "reduced month-end close from 10 days to 6",
        "managed a $15M investment portfolio",
    ],
    buzzwords: &["financial modeling", "variance analysis", "regulatory compliance"],
};

static HEALTHCARE: IndustryTemplate = IndustryTemplate {
    verbs: &["administered", "coordinated", "assessed", "treated", "educated"],
    metrics: &[
        "cared for 25+ patients per shift",
        "reduced readmission rates by 20%",
        "achieved 100% compliance on safety audits",
    ],
    buzzwords: &["patient-centered care", "evidence-based practice", "care coordination"],
};

static EDUCATION: IndustryTemplate = IndustryTemplate {
    verbs: &["instructed", "mentored", "designed", "assessed", "facilitated"],
    metrics: &[
        "raised average test scores by 15%",
        "taught 120+ students per semester",
        "achieved a 95% course completion rate",
    ],
    buzzwords: &["differentiated instruction", "student engagement", "curriculum design"],
};

static RETAIL: IndustryTemplate = IndustryTemplate {
    verbs: &["served", "merchandised", "upsold", "organized", "trained"],
    metrics: &[
        "served 150+ customers per shift",
        "exceeded monthly sales targets by 20%",
        "reduced inventory shrinkage by 15%",
    ],
    buzzwords: &["visual merchandising", "inventory control", "customer experience"],
};

static GENERAL: IndustryTemplate = IndustryTemplate {
    verbs: &["delivered", "executed", "implemented", "managed", "achieved"],
    metrics: &[
        "improved team efficiency by 20%",
        "completed 30+ deliverables ahead of schedule",
        "saved 10 hours per week through automation",
    ],
    buzzwords: &["process improvement", "cross-functional collaboration", "operational excellence"],
};

/// Template for an industry; unknown or absent industries use a general-purpose set.
pub fn industry_template(industry: Option<Industry>) -> &'static IndustryTemplate {
    match industry {
        Some(Industry::SoftwareEngineering) => &SOFTWARE,
        Some(Industry::Sales) => &SALES,
        Some(Industry::Marketing) => &MARKETING,
        Some(Industry::CustomerService) => &CUSTOMER_SERVICE,
        Some(Industry::ProjectManagement) => &PROJECT_MANAGEMENT,
        Some(Industry::Finance) => &FINANCE,
        Some(Industry::Healthcare) => &HEALTHCARE,
        Some(Industry::Education) => &EDUCATION,
        Some(Industry::Retail) => &RETAIL,
        None => &GENERAL,
    }
}

/// Verb used for the role-level alternative phrasing.
pub fn role_level_verb(level: RoleLevel) -> &'static str {
    match level {
        RoleLevel::Entry => "supported",
        RoleLevel::Mid => "coordinated",
        RoleLevel::Senior => "spearheaded",
        RoleLevel::Executive => "strategically directed",
    }
}

/// Team-size options widen with seniority.
pub fn team_size_options(level: RoleLevel) -> &'static [&'static str] {
    match level {
        RoleLevel::Entry => &["2-3", "3-5", "5+"],
        RoleLevel::Mid => &["3-5", "5-8", "8-12"],
        RoleLevel::Senior => &["5-10", "10-15", "15-25"],
        RoleLevel::Executive => &["20-50", "50-100", "100+"],
    }
}

/// Percentage options widen with seniority.
pub fn percentage_options(level: RoleLevel) -> &'static [&'static str] {
    match level {
        RoleLevel::Entry => &["5%", "10%", "15%"],
        RoleLevel::Mid => &["10%", "15%", "20%", "25%"],
        RoleLevel::Senior => &["15%", "25%", "35%", "50%"],
        RoleLevel::Executive => &["20%", "35%", "50%", "75%"],
    }
}

/// Volume magnitudes differ by industry; retail, software and healthcare have their own scale.
pub fn volume_options(industry: Option<Industry>) -> &'static [&'static str] {
    match industry {
        Some(Industry::Retail) => &[
            "50+ customers daily",
            "100+ customers daily",
            "200+ customers daily",
            "1,000+ customers weekly",
        ],
        Some(Industry::SoftwareEngineering) => &[
            "1,000+ users",
            "10,000+ users",
            "100,000+ users",
            "1M+ users",
        ],
        Some(Industry::Healthcare) => &[
            "15+ patients daily",
            "30+ patients daily",
            "100+ patients weekly",
            "500+ patients monthly",
        ],
        _ => &["25+ clients", "50+ clients", "100+ clients", "500+ clients"],
    }
}

pub const FREQUENCY_OPTIONS: &[&str] = &["daily", "weekly", "bi-weekly", "monthly"];
