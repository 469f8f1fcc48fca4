//! Consultation report — plain-text export of one completed analysis.
//! Free-form text for download/rendering; not a wire contract.

use serde::{Deserialize, Serialize};

use crate::engine::profile::JobProfile;
use crate::engine::simulation::{Analysis, SkillAdvice};

/// Display preference for salary figures. Insight math always runs on yearly
/// values; this only scales what the report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Yearly,
    Monthly,
}

impl PayPeriod {
    fn divisor(self) -> f64 {
        match self {
            PayPeriod::Yearly => 1.0,
            PayPeriod::Monthly => 12.0,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            PayPeriod::Yearly => "/ year",
            PayPeriod::Monthly => "/ month",
        }
    }
}

/// Renders one completed analysis as a plain-text consultation report.
pub fn consultation_report(
    profile: &JobProfile,
    analysis: &Analysis,
    pay_period: PayPeriod,
) -> String {
    let divisor = pay_period.divisor();
    let estimate = format_usd(analysis.point_estimate / divisor);
    let low = format_usd(analysis.low / divisor);
    let high = format_usd(analysis.high / divisor);

    let tip = match &analysis.skill_advice {
        SkillAdvice::Learn { skill, uplift } => format!(
            "Adding '{skill}' could increase value by {}/yr",
            format_usd(*uplift)
        ),
        SkillAdvice::CompetitiveSet => "Profile is well-optimized.".to_string(),
    };

    format!(
        "PAYGRADE CONSULTATION REPORT\n\
         ----------------------------\n\
         Role: {role}\n\
         Experience: {experience}\n\
         Location: {location}\n\
         Remote: {remote}\n\
         Skills: {skills}\n\
         \n\
         PREDICTION\n\
         ----------\n\
         Estimated: {estimate} {unit}\n\
         Range: {low} - {high}\n\
         \n\
         SKILL TIP\n\
         ---------\n\
         {tip}\n",
        role = profile.title,
        experience = profile.experience,
        location = profile.location,
        remote = if profile.remote { "Yes" } else { "No" },
        skills = profile.skill_summary(),
        estimate = estimate,
        unit = pay_period.unit(),
        low = low,
        high = high,
        tip = tip,
    )
}

/// Formats a currency amount with thousands separators, e.g. `$1,234,567`.
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::SkillInput;
    use crate::engine::simulation::{CurvePoint, RelocationEntry};

    fn make_analysis(advice: SkillAdvice) -> Analysis {
        Analysis {
            point_estimate: 96_000.0,
            low: 96_000.0 * 0.88,
            high: 96_000.0 * 1.12,
            monthly: 8_000.0,
            skill_advice: advice,
            relocations: vec![RelocationEntry {
                location: "CA".to_string(),
                estimate: 110_000.0,
            }],
            seniority_curve: vec![CurvePoint {
                level: "Internship".to_string(),
                estimate: 40_000.0,
            }],
        }
    }

    fn make_profile() -> JobProfile {
        JobProfile {
            title: "Data Scientist".to_string(),
            skills: SkillInput::Selected(vec!["Python".to_string(), "SQL".to_string()]),
            location: "NY".to_string(),
            experience: "Entry Level".to_string(),
            remote: false,
        }
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(950.0), "$950");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(123_456.4), "$123,456");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(-20_000.0), "-$20,000");
    }

    #[test]
    fn test_report_contains_profile_and_prediction() {
        let report = consultation_report(
            &make_profile(),
            &make_analysis(SkillAdvice::CompetitiveSet),
            PayPeriod::Yearly,
        );

        assert!(report.contains("Role: Data Scientist"));
        assert!(report.contains("Location: NY"));
        assert!(report.contains("Skills: Python, SQL"));
        assert!(report.contains("Estimated: $96,000 / year"));
        assert!(report.contains("Range: $84,480 - $107,520"));
        assert!(report.contains("Profile is well-optimized."));
    }

    #[test]
    fn test_report_skill_tip_with_uplift() {
        let report = consultation_report(
            &make_profile(),
            &make_analysis(SkillAdvice::Learn {
                skill: "AWS".to_string(),
                uplift: 20_000.0,
            }),
            PayPeriod::Yearly,
        );

        assert!(report.contains("Adding 'AWS' could increase value by $20,000/yr"));
    }

    #[test]
    fn test_monthly_report_scales_displayed_figures() {
        let report = consultation_report(
            &make_profile(),
            &make_analysis(SkillAdvice::CompetitiveSet),
            PayPeriod::Monthly,
        );

        assert!(report.contains("Estimated: $8,000 / month"));
    }
}
