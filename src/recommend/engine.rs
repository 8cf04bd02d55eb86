//! Expands insights into recommendation records and applies the final
//! priority/impact ordering.

use crate::insight::{Insight, InsightCategory, OverallRating, QualityRating, RiskLevel};
use crate::recommend::types::{Impact, Priority, Recommendation};

const TIMEFRAME_IMMEDIATE: &str = "within 48 hours";
const TIMEFRAME_SHORT: &str = "next 30 days";
const TIMEFRAME_SEASON: &str = "this season";
const TIMEFRAME_NEXT_SEASON: &str = "next season";

/// Derive and sort the recommendation list for one run's insight set.
pub fn recommend(insights: &[Insight]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    for insight in insights {
        expand(insight, &mut recommendations);
    }
    sort_recommendations(&mut recommendations);
    recommendations
}

/// Stable total order: priority descending, impact descending, equal pairs
/// keep generation order.
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.impact.cmp(&a.impact))
    });
}

fn expand(insight: &Insight, out: &mut Vec<Recommendation>) {
    if !insight.overall.needs_attention() && insight.issues.is_empty() {
        return;
    }

    let priority = priority_for(&insight.overall);
    let before = out.len();

    match insight.category {
        InsightCategory::SoilHealth => soil_health(insight, priority, out),
        InsightCategory::CropSuitability => crop_suitability(insight, priority, out),
        InsightCategory::WaterManagement => water_management(insight, priority, out),
        InsightCategory::PestRisk => pest_risk(insight, priority, out),
        InsightCategory::YieldPotential => yield_potential(insight, priority, out),
        InsightCategory::ClimateAdaptation => climate_adaptation(insight, priority, out),
    }

    // Issue list was non-empty but every issue is covered elsewhere; keep a
    // low-stakes follow-up so the category is not silently dropped.
    if out.len() == before {
        out.push(Recommendation {
            category: insight.category,
            priority,
            impact: Impact::Low,
            action: format!(
                "Review {} signals with a local agronomist",
                insight.category.as_str().replace('_', " ")
            ),
            timeframe: TIMEFRAME_SHORT.to_string(),
        });
    }
}

fn priority_for(overall: &OverallRating) -> Priority {
    match overall {
        OverallRating::Quality(QualityRating::Poor) => Priority::High,
        OverallRating::Quality(QualityRating::Fair) => Priority::Medium,
        OverallRating::Quality(_) => Priority::Low,
        OverallRating::Risk(RiskLevel::High) => Priority::High,
        OverallRating::Risk(RiskLevel::Moderate) => Priority::Medium,
        OverallRating::Risk(RiskLevel::Low) => Priority::Low,
    }
}

fn push(
    out: &mut Vec<Recommendation>,
    category: InsightCategory,
    priority: Priority,
    impact: Impact,
    action: &str,
    timeframe: &str,
) {
    out.push(Recommendation {
        category,
        priority,
        impact,
        action: action.to_string(),
        timeframe: timeframe.to_string(),
    });
}

fn soil_health(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    for issue in &insight.issues {
        if issue.contains("acidic") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Apply agricultural lime to correct soil acidity",
                TIMEFRAME_SHORT,
            );
        } else if issue.contains("alkaline") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Apply elemental sulfur or gypsum to lower soil pH",
                TIMEFRAME_SHORT,
            );
        } else if issue.contains("waterlogged") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Open drainage channels before the next irrigation cycle",
                TIMEFRAME_IMMEDIATE,
            );
        } else if issue.contains("organic matter") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Incorporate compost or green manure to rebuild organic matter",
                TIMEFRAME_SEASON,
            );
        }
        // Low soil moisture is handled by the water management category.
    }
}

fn crop_suitability(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    for issue in &insight.issues {
        if issue.contains("heat stress") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Switch to heat-tolerant varieties for the coming rotation",
                TIMEFRAME_NEXT_SEASON,
            );
        } else if issue.contains("cold stress") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Favor short-season, cold-hardy varieties",
                TIMEFRAME_NEXT_SEASON,
            );
        } else if issue.contains("sparse canopy") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Re-sow thin stands and verify seed viability",
                TIMEFRAME_SHORT,
            );
        } else if issue.contains("alkaline") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Select alkaline-tolerant crops such as barley or mustard",
                TIMEFRAME_NEXT_SEASON,
            );
        }
    }
}

fn water_management(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    let needs_irrigation = insight
        .issues
        .iter()
        .any(|f| f.contains("moisture deficit") || f.contains("little rainfall"));
    if needs_irrigation {
        push(
            out,
            insight.category,
            priority,
            Impact::High,
            "Schedule supplemental irrigation to close the moisture gap",
            TIMEFRAME_IMMEDIATE,
        );
    }
    for factor in &insight.issues {
        if factor.contains("drainage") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Pause irrigation and open field drainage",
                TIMEFRAME_IMMEDIATE,
            );
        } else if factor.contains("evapotranspiration") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Irrigate at dawn and mulch rows to cut evaporation losses",
                TIMEFRAME_SHORT,
            );
        }
    }
}

fn pest_risk(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    for factor in &insight.issues {
        if factor.contains("humidity") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Scout for fungal outbreaks and stage preventive fungicide",
                TIMEFRAME_IMMEDIATE,
            );
        } else if factor.contains("disease") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Confirm disease in flagged zones and treat affected rows",
                TIMEFRAME_IMMEDIATE,
            );
        } else if factor.contains("pest activity") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Set pheromone traps to monitor pest pressure",
                TIMEFRAME_SHORT,
            );
        } else if factor.contains("standing moisture") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Clear standing water and ventilate dense canopy sections",
                TIMEFRAME_IMMEDIATE,
            );
        }
    }
}

fn yield_potential(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    for issue in &insight.issues {
        if issue.contains("sparse canopy") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Top-dress nitrogen to push canopy growth",
                TIMEFRAME_SHORT,
            );
        } else if issue.contains("heat stress") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Plan stress-mitigating irrigation around flowering",
                TIMEFRAME_SEASON,
            );
        }
        // The moisture deficit issue is handled by the water management
        // category.
    }
}

fn climate_adaptation(insight: &Insight, priority: Priority, out: &mut Vec<Recommendation>) {
    for issue in &insight.issues {
        if issue.contains("surface heat") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Establish cover crops or mulch to reduce surface heat",
                TIMEFRAME_SEASON,
            );
        } else if issue.contains("wind") {
            push(
                out,
                insight.category,
                priority,
                Impact::Medium,
                "Plant windbreaks along exposed field edges",
                TIMEFRAME_NEXT_SEASON,
            );
        } else if issue.contains("extreme heat") {
            push(
                out,
                insight.category,
                priority,
                Impact::High,
                "Shift the sowing calendar to dodge peak heat windows",
                TIMEFRAME_NEXT_SEASON,
            );
        }
    }
}
