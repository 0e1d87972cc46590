//! Default pricing catalogue inserted into an empty `pricing_plans` table.

use vows_core::pricing::PlanCategory;

use crate::models::pricing::CreatePricingPlan;
use crate::repositories::PricingRepo;

struct SeedPlan {
    category: PlanCategory,
    name: &'static str,
    price: &'static str,
    features: &'static [&'static str],
    badge: Option<&'static str>,
}

const CATALOGUE: &[SeedPlan] = &[
    SeedPlan {
        category: PlanCategory::Foto,
        name: "Foto Essencial",
        price: "R$ 3.200",
        features: &["Cobertura parcial", "Galeria online privada", "Fotos tratadas em alta resolução"],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Foto,
        name: "Foto Clássico",
        price: "R$ 4.800",
        features: &["Cobertura completa do dia", "Galeria online", "Álbum digital"],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Foto,
        name: "Foto Signature",
        price: "R$ 6.900",
        features: &[
            "Cobertura completa",
            "Curadoria artística personalizada",
            "Álbum premium",
            "Sessão pré-casamento",
        ],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Video,
        name: "Vídeo Essencial",
        price: "R$ 4.200",
        features: &["Cobertura parcial", "Trailer cinematográfico"],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Video,
        name: "Vídeo Cinematográfico",
        price: "R$ 5.900",
        features: &["Cobertura estendida", "Trailer + teaser para redes"],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Video,
        name: "Vídeo Signature",
        price: "R$ 8.500",
        features: &[
            "Cobertura completa",
            "Trailer + filme completo com storytelling",
            "Captação profissional de áudio",
            "Versão longa + versão curta para redes",
        ],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Combo,
        name: "Combo Clássico",
        price: "R$ 9.500",
        features: &["Foto completa", "Vídeo cinematográfico", "Galeria", "Trailer", "Álbum digital"],
        badge: None,
    },
    SeedPlan {
        category: PlanCategory::Combo,
        name: "Combo Signature",
        price: "R$ 13.900",
        features: &[
            "Cobertura completa foto + vídeo",
            "Trailer + filme completo",
            "Sessão pré-casamento",
            "Álbum premium",
            "Teasers para redes",
        ],
        badge: Some("Mais escolhido"),
    },
];

/// The studio's plans, with `sort_order` counted within each category.
pub fn default_pricing_plans() -> Vec<CreatePricingPlan> {
    let mut plans = Vec::with_capacity(CATALOGUE.len());
    for category in PlanCategory::ALL {
        let in_category = CATALOGUE.iter().filter(|p| p.category == category);
        for (position, seed) in in_category.enumerate() {
            plans.push(CreatePricingPlan {
                category: seed.category,
                name: seed.name.to_string(),
                price: seed.price.to_string(),
                features: seed.features.iter().map(|f| f.to_string()).collect(),
                badge: seed.badge.map(str::to_string),
                highlight: seed.badge.is_some(),
                sort_order: position as i32,
            });
        }
    }
    plans
}

/// Insert the default catalogue when no plans exist yet. Returns the number inserted.
pub async fn ensure_pricing_plans(repo: &dyn PricingRepo) -> Result<usize, sqlx::Error> {
    if repo.count().await? > 0 {
        return Ok(0);
    }
    let plans = default_pricing_plans();
    for plan in &plans {
        repo.create(plan).await?;
    }
    tracing::info!(count = plans.len(), "Seeded default pricing plans");
    Ok(plans.len())
}
