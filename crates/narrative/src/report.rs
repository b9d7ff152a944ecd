//! Written groundwater reports.
//!
//! The LLM is prompted for four bold-headed sections. The reply is split on
//! those headings and rendered into a Markdown document with data samples.

use crate::error::{NarrativeError, Result};
use crate::table::{forecast_sample, forecast_table, history_sample, history_table, SAMPLE_ROWS};
use chrono::NaiveDate;
use data_spi::GroundwaterRecord;
use forecast_spi::ForecastPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the prompt and document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    #[default]
    En,
    Fr,
}

impl ReportLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            ReportLanguage::En => "en",
            ReportLanguage::Fr => "fr",
        }
    }

    /// Section headings in document order
    pub fn headings(&self) -> [&'static str; 4] {
        match self {
            ReportLanguage::En => [
                "Executive Summary",
                "Historical Data Insights",
                "Forecast Interpretation",
                "Recommendations",
            ],
            ReportLanguage::Fr => [
                "Résumé Exécutif",
                "Analyse des Données Historiques",
                "Interprétation des Prévisions",
                "Recommandations",
            ],
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ReportLanguage::En => "Groundwater Level Report",
            ReportLanguage::Fr => "Rapport sur le Niveau des Eaux Souterraines",
        }
    }

    fn history_sample_label(&self) -> &'static str {
        match self {
            ReportLanguage::En => "Sample of Historical Data",
            ReportLanguage::Fr => "Extrait des Données Historiques",
        }
    }

    fn forecast_sample_label(&self) -> &'static str {
        match self {
            ReportLanguage::En => "Sample of Forecasted Data",
            ReportLanguage::Fr => "Extrait des Données Prévisionnelles",
        }
    }
}

impl fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportLanguage {
    type Err = NarrativeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(ReportLanguage::En),
            "fr" | "french" | "français" => Ok(ReportLanguage::Fr),
            other => Err(NarrativeError::InvalidInput(format!(
                "unsupported report language '{}'",
                other
            ))),
        }
    }
}

/// Prompt asking for the four-section report.
pub fn report_prompt(
    language: ReportLanguage,
    history: &[GroundwaterRecord],
    forecast: &[ForecastPoint],
) -> String {
    let [summary, insights, interpretation, recommendations] = language.headings();
    let history_text = history_table(history);

    match language {
        ReportLanguage::En => {
            let forecast_text = if forecast.is_empty() {
                "No forecast data available.".to_string()
            } else {
                forecast_table(forecast)
            };
            format!(
                "You are an expert hydrogeologist with 20+ years of experience.\n\
                 Generate a comprehensive groundwater level analysis and forecasting report based on the following data.\n\
                 The report should be professional, insightful, and actionable.\n\n\
                 Historical Groundwater Data (Date, Level):\n{history_text}\n\n\
                 Forecasted Groundwater Data (Date, Level):\n{forecast_text}\n\n\
                 The report must include the following sections:\n\
                 1. **{summary}:** A concise overview of findings and recommendations.\n\
                 2. **{insights}:** Detailed analysis of historical trends, seasonality, and any anomalies. \
                 Discuss minimum, maximum, mean levels, and overall stability or change.\n\
                 3. **{interpretation}:** Analysis of the predicted future groundwater levels, including potential \
                 implications for water management, sustainability, and any associated risks or opportunities. \
                 Discuss the confidence intervals if applicable.\n\
                 4. **{recommendations}:** Actionable advice for water resource managers, policymakers, or \
                 landowners based on the analysis and forecast.\n\n\
                 Ensure the tone is authoritative and professional."
            )
        }
        ReportLanguage::Fr => {
            let forecast_text = if forecast.is_empty() {
                "Aucune donnée de prévision disponible.".to_string()
            } else {
                forecast_table(forecast)
            };
            format!(
                "Vous êtes un hydrogéologue expert avec plus de 20 ans d'expérience.\n\
                 Générez un rapport complet d'analyse et de prévision du niveau des eaux souterraines basé sur les données suivantes.\n\
                 Le rapport doit être professionnel, perspicace et exploitable.\n\n\
                 Données historiques sur le niveau des eaux souterraines (Date, Niveau):\n{history_text}\n\n\
                 Données prévisionnelles sur le niveau des eaux souterraines (Date, Niveau):\n{forecast_text}\n\n\
                 Le rapport doit inclure les sections suivantes:\n\
                 1. **{summary}:** Un aperçu concis des conclusions et des recommandations.\n\
                 2. **{insights}:** Analyse détaillée des tendances historiques, de la saisonnalité et des anomalies. \
                 Discutez des niveaux minimum, maximum, moyen, et de la stabilité ou des changements globaux.\n\
                 3. **{interpretation}:** Analyse des niveaux futurs prévus des eaux souterraines, y compris les \
                 implications potentielles pour la gestion de l'eau, la durabilité et les risques ou opportunités \
                 associés. Discutez des intervalles de confiance si applicable.\n\
                 4. **{recommendations}:** Conseils exploitables pour les gestionnaires des ressources en eau, les \
                 décideurs ou les propriétaires fonciers basés sur l'analyse et les prévisions.\n\n\
                 Assurez-vous que le ton est autoritaire et professionnel."
            )
        }
    }
}

/// The four sections of a generated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSections {
    pub executive_summary: String,
    pub historical_insights: String,
    pub forecast_interpretation: String,
    pub recommendations: String,
}

/// Locate a bold heading at or after `from`, returning (start, end) of the marker.
fn find_heading(text: &str, heading: &str, from: usize) -> Option<(usize, usize)> {
    let markers = [
        format!("**{}:**", heading),
        format!("**{}**:", heading),
        format!("**{}**", heading),
    ];
    markers.iter().find_map(|marker| {
        text[from..]
            .find(marker.as_str())
            .map(|pos| (from + pos, from + pos + marker.len()))
    })
}

impl ReportSections {
    /// Split LLM output on the section headings of `language`.
    ///
    /// English headings are accepted for any language since models often
    /// answer with them regardless of the prompt language.
    pub fn parse(text: &str, language: ReportLanguage) -> Result<Self> {
        match Self::parse_with(text, language.headings()) {
            Err(err) if language != ReportLanguage::En => {
                Self::parse_with(text, ReportLanguage::En.headings()).map_err(|_| err)
            }
            result => result,
        }
    }

    fn parse_with(text: &str, headings: [&str; 4]) -> Result<Self> {
        let mut bounds = Vec::with_capacity(4);
        let mut cursor = 0;
        for heading in headings {
            let (start, end) = find_heading(text, heading, cursor)
                .ok_or_else(|| NarrativeError::MalformedReport(heading.to_string()))?;
            bounds.push((start, end));
            cursor = end;
        }

        let body = |i: usize| -> String {
            let start = bounds[i].1;
            let end = bounds.get(i + 1).map(|b| b.0).unwrap_or(text.len());
            clean_body(&text[start..end])
        };

        Ok(Self {
            executive_summary: body(0),
            historical_insights: body(1),
            forecast_interpretation: body(2),
            recommendations: body(3),
        })
    }
}

/// Trim a section body, dropping a dangling list number left by the next heading.
fn clean_body(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_number = trimmed
        .rsplit_once('\n')
        .filter(|(_, last)| {
            let last = last.trim();
            !last.is_empty()
                && last.trim_end_matches('.').chars().all(|c| c.is_ascii_digit())
        })
        .map(|(head, _)| head)
        .unwrap_or(trimmed);
    without_number.trim().to_string()
}

/// Render the report document as Markdown.
pub fn render_markdown(
    sections: &ReportSections,
    history: &[GroundwaterRecord],
    forecast: &[ForecastPoint],
    generated_on: NaiveDate,
    language: ReportLanguage,
) -> String {
    let [summary, insights, interpretation, recommendations] = language.headings();
    let mut doc = String::new();

    doc.push_str(&format!("# {}\n\n", language.title()));
    doc.push_str(&format!("Date: {}\n\n", generated_on.format("%Y-%m-%d")));

    doc.push_str(&format!("## 1. {}\n\n{}\n\n", summary, sections.executive_summary));

    doc.push_str(&format!("## 2. {}\n\n", insights));
    if !history.is_empty() {
        doc.push_str(&format!(
            "### {}\n\n```text\n{}\n```\n\n",
            language.history_sample_label(),
            history_sample(history, SAMPLE_ROWS)
        ));
    }
    doc.push_str(&format!("{}\n\n", sections.historical_insights));

    doc.push_str(&format!("## 3. {}\n\n", interpretation));
    if !forecast.is_empty() {
        doc.push_str(&format!(
            "### {}\n\n```text\n{}\n```\n\n",
            language.forecast_sample_label(),
            forecast_sample(forecast, SAMPLE_ROWS)
        ));
    }
    doc.push_str(&format!("{}\n\n", sections.forecast_interpretation));

    doc.push_str(&format!("## 4. {}\n\n{}\n", recommendations, sections.recommendations));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "Here is the report.\n\n\
        1. **Executive Summary:** Levels declined by 2 m.\n\
        2. **Historical Data Insights:**\nA steady fall since 2019.\nNo anomalies.\n\
        3. **Forecast Interpretation:** The decline continues.\n\
        4. **Recommendations:** Reduce pumping.";

    fn record(day: u32, level: f64) -> GroundwaterRecord {
        GroundwaterRecord::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), level)
    }

    #[test]
    fn test_parse_sections() {
        let sections = ReportSections::parse(REPLY, ReportLanguage::En).unwrap();
        assert_eq!(sections.executive_summary, "Levels declined by 2 m.");
        assert_eq!(
            sections.historical_insights,
            "A steady fall since 2019.\nNo anomalies."
        );
        assert_eq!(sections.forecast_interpretation, "The decline continues.");
        assert_eq!(sections.recommendations, "Reduce pumping.");
    }

    #[test]
    fn test_parse_missing_section() {
        let err = ReportSections::parse("**Executive Summary:** only this", ReportLanguage::En)
            .unwrap_err();
        assert_eq!(
            err,
            NarrativeError::MalformedReport("Historical Data Insights".into())
        );
    }

    #[test]
    fn test_parse_french_headings() {
        let reply = "**Résumé Exécutif:** Baisse.\n**Analyse des Données Historiques:** Stable.\n\
                     **Interprétation des Prévisions:** Hausse.\n**Recommandations:** Surveiller.";
        let sections = ReportSections::parse(reply, ReportLanguage::Fr).unwrap();
        assert_eq!(sections.recommendations, "Surveiller.");
    }

    #[test]
    fn test_parse_french_falls_back_to_english() {
        let sections = ReportSections::parse(REPLY, ReportLanguage::Fr).unwrap();
        assert_eq!(sections.recommendations, "Reduce pumping.");
    }

    #[test]
    fn test_parse_heading_with_colon_outside() {
        let reply = "**Executive Summary**: a\n**Historical Data Insights**: b\n\
                     **Forecast Interpretation**: c\n**Recommendations**: d";
        let sections = ReportSections::parse(reply, ReportLanguage::En).unwrap();
        assert_eq!(sections.historical_insights, "b");
        assert_eq!(sections.recommendations, "d");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("FR".parse::<ReportLanguage>().unwrap(), ReportLanguage::Fr);
        assert_eq!("english".parse::<ReportLanguage>().unwrap(), ReportLanguage::En);
        assert!("de".parse::<ReportLanguage>().is_err());
    }

    #[test]
    fn test_prompt_contains_data_and_headings() {
        let prompt = report_prompt(ReportLanguage::En, &[record(1, 12.5)], &[]);
        assert!(prompt.contains("2024-01-01  12.500"));
        assert!(prompt.contains("No forecast data available."));
        assert!(prompt.contains("**Recommendations:**"));

        let prompt = report_prompt(ReportLanguage::Fr, &[record(1, 12.5)], &[]);
        assert!(prompt.contains("Aucune donnée de prévision disponible."));
        assert!(prompt.contains("**Résumé Exécutif:**"));
    }

    #[test]
    fn test_render_markdown() {
        let sections = ReportSections::parse(REPLY, ReportLanguage::En).unwrap();
        let history: Vec<GroundwaterRecord> = (1..=12).map(|d| record(d, d as f64)).collect();
        let doc = render_markdown(
            &sections,
            &history,
            &[],
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ReportLanguage::En,
        );

        assert!(doc.starts_with("# Groundwater Level Report\n\nDate: 2024-06-01"));
        assert!(doc.contains("## 1. Executive Summary\n\nLevels declined by 2 m."));
        assert!(doc.contains("### Sample of Historical Data"));
        assert!(doc.contains("... and 2 more rows"));
        assert!(!doc.contains("Sample of Forecasted Data"));
        assert!(doc.ends_with("## 4. Recommendations\n\nReduce pumping.\n"));
    }

    #[test]
    fn test_clean_body_drops_trailing_number() {
        assert_eq!(clean_body(" text\n2. "), "text");
        assert_eq!(clean_body("text\nmore"), "text\nmore");
        assert_eq!(clean_body("2024"), "2024");
    }
}
