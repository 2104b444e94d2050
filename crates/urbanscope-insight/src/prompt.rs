use urbanscope_core::{display_label, PopulationRecord};

/// Fixed domain context embedded in every prediction prompt. Growth in the
/// region is constrained by the Greenbelt and channeled along the major
/// transportation corridors, and the model is told so up front.
const EXPERT_CONTEXT: &str = "\
Predicting urban sprawl involves analyzing demographic, economic, and spatial data. \
Key indicators include population growth, job growth, land use, transportation \
infrastructure, zoning regulations, and proximity to services and natural features. \
For the Greater Toronto Area, a major constraint is the Ontario Greenbelt, a protected \
area of green space, farmland, and natural heritage sites which limits outward expansion \
in many areas. Therefore, growth is often channeled towards designated intensification \
areas or along major transportation corridors like Highways 401, 407, and 400.";

/// Convert a record sequence to a compact text table for LLM consumption.
pub fn serialize_records(records: &[PopulationRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 32);
    for rec in records {
        out.push_str(&rec.year.to_string());
        out.push_str(": ");
        out.push_str(&format!("{:.2}", rec.population));
        out.push_str(" million");
        if rec.projected {
            out.push_str(" (projected)");
        }
        out.push('\n');
    }
    out
}

pub fn analysis_system_prompt() -> &'static str {
    "You are an expert urban planning and demographics analyst. \
Analyze the population data you are given and provide a brief, insightful summary \
of the growth trend. The data includes historical figures and future projections; \
population numbers are in millions. Your summary should be concise, easy to read \
for a general audience, and highlight key takeaways, such as the rate of growth \
and the implications of the projected numbers. Format your output as simple text."
}

pub fn analysis_user_message(records: &[PopulationRecord], location: &str) -> String {
    format!(
        "Population data for {} (in millions):\n{}",
        display_label(location),
        serialize_records(records)
    )
}

pub fn prediction_system_prompt() -> String {
    format!(
        "Act as an expert geo-spatial and urban planning analyst. Based on the expert \
context and the population data you are given, predict future urban sprawl. The \
population data is a primary indicator of future demand.\n\n\
Expert context:\n{}\n\n\
Your task is to provide a structured JSON object. Based on the projected population \
increase and the provided context (especially transportation corridors and Greenbelt \
constraints), provide estimates for the following:\n\
1. \"urbanAreaGrowth\": a string for the estimated percentage increase in physical \
urban footprint by 2041 (e.g., \"15-20%\").\n\
2. \"populationDensityChange\": a short descriptive string (e.g., \"Moderate Increase\", \
\"High Increase\", \"Significant Densification\").\n\
3. \"infrastructureStrain\": a qualitative rating (e.g., \"Moderate\", \"High\", \"Very High\").\n\
4. \"summary\": a concise paragraph (4-6 sentences) explaining your predictions, \
referencing the population data and the principles from the expert context.\n\
5. \"factorsConsidered\": an array of 4-5 strings listing key factors you considered \
(e.g., \"High projected population growth\", \"Proximity to major highways\", \
\"Ontario Greenbelt legislation\").\n\
6. \"growthHotspots\": an array of 2-3 short, specific, map-searchable strings \
identifying potential high-growth areas within or adjacent to the location \
(e.g., \"Northwest Brampton\", \"Vaughan Metropolitan Centre\", \"East Markham near Hwy 404\").\n\n\
Output ONLY the JSON object, nothing else.",
        EXPERT_CONTEXT
    )
}

pub fn prediction_user_message(records: &[PopulationRecord], location: &str) -> String {
    format!(
        "Population data for {} (in millions):\n{}",
        display_label(location),
        serialize_records(records)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<PopulationRecord> {
        vec![
            PopulationRecord { year: 2021, population: 6.7, projected: false },
            PopulationRecord { year: 2041, population: 9.5, projected: true },
        ]
    }

    #[test]
    fn serialized_records_mark_projections() {
        let text = serialize_records(&sample_records());
        assert_eq!(text, "2021: 6.70 million\n2041: 9.50 million (projected)\n");
    }

    #[test]
    fn analysis_message_embeds_label_and_data() {
        let msg = analysis_user_message(&sample_records(), "GTA");
        assert!(msg.contains("the Greater Toronto Area (GTA)"));
        assert!(msg.contains("2041: 9.50 million (projected)"));

        let msg = analysis_user_message(&sample_records(), "Brampton");
        assert!(msg.contains("Population data for Brampton"));
    }

    #[test]
    fn prediction_prompt_carries_domain_context_and_fields() {
        let system = prediction_system_prompt();
        assert!(system.contains("Ontario Greenbelt"));
        assert!(system.contains("Highways 401, 407, and 400"));
        for field in [
            "urbanAreaGrowth",
            "populationDensityChange",
            "infrastructureStrain",
            "summary",
            "factorsConsidered",
            "growthHotspots",
        ] {
            assert!(system.contains(field), "prompt missing {field}");
        }
    }

    #[test]
    fn prompts_are_pure_templates() {
        let a = prediction_user_message(&sample_records(), "Markham");
        let b = prediction_user_message(&sample_records(), "Markham");
        assert_eq!(a, b);
    }
}
