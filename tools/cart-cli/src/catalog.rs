//! The built-in service catalog (the picker's data).

use servicecart_core::{CartItem, Currency, Money};

pub struct Tier {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: i64,
    pub desc: &'static str,
}

pub struct Service {
    pub category: &'static str,
    pub service_id: &'static str,
    pub name: &'static str,
    pub tiers: &'static [Tier],
}

pub const CATALOG: &[Service] = &[
    Service {
        category: "Design",
        service_id: "logo",
        name: "Logo Design",
        tiers: &[
            Tier {
                id: "basic",
                name: "Starter",
                price_cents: 9900,
                desc: "1 concept, 1 revision",
            },
            Tier {
                id: "pro",
                name: "Pro",
                price_cents: 24900,
                desc: "2 concepts, 3 revisions",
            },
            Tier {
                id: "elite",
                name: "Elite",
                price_cents: 49900,
                desc: "3 concepts, unlimited revisions",
            },
        ],
    },
    Service {
        category: "Development",
        service_id: "audit",
        name: "Site Audit",
        tiers: &[
            Tier {
                id: "basic",
                name: "Lite",
                price_cents: 14900,
                desc: "Core vitals snapshot",
            },
            Tier {
                id: "pro",
                name: "Pro",
                price_cents: 29900,
                desc: "Perf + accessibility",
            },
            Tier {
                id: "elite",
                name: "Max",
                price_cents: 59900,
                desc: "Full audit + roadmap",
            },
        ],
    },
];

/// Look up `<service>:<tier>` and build its line item.
pub fn find(key: &str, currency: Currency) -> Option<CartItem> {
    let (service_id, tier_id) = key.split_once(':')?;
    let service = CATALOG.iter().find(|s| s.service_id == service_id)?;
    let tier = service.tiers.iter().find(|t| t.id == tier_id)?;

    Some(
        CartItem::new(
            format!("{}:{}", service.service_id, tier.id),
            format!("{} — {}", service.name, tier.name),
            Money::new(tier.price_cents, currency),
        )
        .with_sku(format!("{}-{}", service.service_id, tier.id)),
    )
}
