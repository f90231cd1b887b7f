//! Instruction text sent with every analysis request.

/// Business request analysed when no topic file is supplied.
pub const DEFAULT_TOPIC: &str = r#"By using tools like celonis and disco we can create a smart python script for process identification, identification of areas where improvement is needed, and creating architectures intended to solve known and unknown weak areas in business models and workflows in commercial/industrial businesses large and small, which can map out real world cost cutting strategies, increase productivity, minimize hurdles, bottlenecks, and blockers, and pinpoint viable, profitable strategies, and lucrative alternatives for business in areas they could stand to benefit by improving. Top dollar, bottom dollar - the only thing that matters to these stuffed suits is dollars.

Implementation of chat bots and ai integration in tasks ranging from customer service to data entry and invoice processing to payroll and scheduling, and even robotics and hardware integrations. ML models could analyze vast amounts of data in real time and leverage predictive analytics to make moves before the competition. This would blow AI wrappers out of the water, or so I would suspect.

This initial script could be just one part of a whole series of scripts, agents, and automations that cover ethical considerations and safety standards, create training programs to educate employees on working with AI, and even handle hr aspects ensuring a harmonious workplace between AI and human employees.

Done correctly and adhered to, there's no way these packages wouldn't provide business much needed optimization, streamlined automation, and show a ROI for chairmen and shareholders almost immediately. Offered as SaaS packages, this could gain serious traction by as soon as Q2 2026.

What are the most optimal ways to scaffold their architectures? To sequence the related code snippets? To select their tech stacks?

Create and compare/contrast at least two different frameworks for 3 different areas of commerce and industry please, then run sims showing likelihoods for each of the pairs, following the most logical paths to success or failure. Run a quick 6 hat exercise on the winning concepts for further understanding. Create an outline of the paths and their outcomes in markdown, and generate an executive summary for this thought experiment as well please!

Additionally, propose a high-level Software-as-a-Service (SaaS) architecture for the process optimization and AI platform, considering scalability, resilience, cost-effectiveness, key components (data ingestion, processing, AI/ML deployment, API gateways, UI, data storage), and relevant Google Cloud Platform (GCP) technologies.

Finally, provide structured outlines for three Python scripts: a core process mining engine, a module for predictive analytics in process data, and a module for predictive analytics in market swings and consumer pain points.

Furthermore, design two conceptual UI layouts for brand comparison ("Vertical AI" vs "Vert"). For "Vertical AI", describe a corporate, button-up, sky-is-the-limit UI feel. For "Vert", describe a more relaxed, "Birkenstock-wearing hipster" UI feel. Run a simulated focus group in Kansas (rural and urban participants) comparing these two branding concepts, including a timestamped dialogue log and a summary of feedback for each brand, plus an overall recommendation.

We don't aim to demonstrate how AI can increase performance and decrease overhead. We aim to make these executives wonder how they ever got along without them!!

Cheers! We're off to the races now!"#;

const ANALYSIS_POINTS: &[&str] = &[
    "**Optimal ways to scaffold architectures for these AI solutions.**",
    "**Optimal ways to sequence related code snippets for these AI solutions.**",
    "**Optimal ways to select tech stacks for these AI solutions.**",
    "**Create and compare/contrast at least two different frameworks for 3 different areas of commerce and industry.**\n    * For each framework, provide: name, description, pros, cons, and key tech stack components.\n    * The 3 areas of commerce and industry should be: Manufacturing, Retail, and Financial Services.",
    "**Run simulations showing likelihoods for each of the framework pairs, following the most logical paths to success or failure.**\n    * Provide a likelihood percentage (0-100) and a brief outcome summary for each.",
    "**Run a quick 6 hat exercise on the winning concepts for further understanding.**\n    * Identify the 'winning concepts' based on the simulation likelihoods.\n    * For each hat (White, Red, Black, Yellow, Green, Blue), describe its focus and provide a summary related to the winning concept.",
    "**Create an outline of the paths and their outcomes in markdown.**",
    "**Generate an executive summary for this thought experiment.**",
    "**Propose a high-level Software-as-a-Service (SaaS) architecture for the process optimization and AI platform.**\n    * Design for scalability, resilience, and cost-effectiveness, focusing on Google Cloud Platform (GCP).\n    * Consider key components: data ingestion, processing layers, AI/ML model deployment, API gateways, user interface, and data storage strategy.\n    * Discuss relevant technologies for each component within GCP.",
    "**Provide structured outlines for three Python scripts:**\n    * **Core Process Mining Engine:** ingests event logs, performs basic process discovery, identifies KPIs (cycle time, throughput), and suggests optimization areas.\n    * **Predictive Analytics Module (Process-focused):** extends process mining to train ML models on historical data, forecasts metrics (completion time, resource needs), and generates alerts and recommendations.\n    * **Predictive Analytics Module (Market/Consumer-focused):** focuses on market swings and consumer pain points, providing insights and solutions before they happen.",
    "**Design two conceptual UI layouts for brand comparison (\"Vertical AI\" vs \"Vert\").**\n    * For \"Vertical AI\", describe a corporate, button-up, sky-is-the-limit UI feel.\n    * For \"Vert\", describe a more relaxed, \"Birkenstock-wearing hipster\" UI feel.",
    "**Run a simulated focus group in Kansas (rural and urban participants) comparing these two branding concepts.**\n    * Generate a list of diverse participants (names, personas, location, e.g. Topeka, KS (Rural); Kansas City, MO (Urban)).\n    * Provide a timestamped dialogue log of the participants discussing and comparing the two branding concepts, noting which brand each line reacts to.\n    * Summarize the feedback for \"Vertical AI\" (overall sentiment, key pros and cons, recommendations).\n    * Summarize the feedback for \"Vert\" (overall sentiment, key pros and cons, recommendations).\n    * Recommend which brand to pursue based on the simulated focus group.",
];

pub fn build_instruction(topic: &str) -> String {
    let mut out = String::from(
        "Analyze the following business optimization request and provide a comprehensive response in a structured JSON format.\n\
The request details using AI for process identification, improvement, automation (customer service, data entry, robotics, payroll, scheduling), predictive analytics, and HR aspects (ethics, training, human-AI harmony). It emphasizes ROI and a SaaS offering.\n\n\
Specifically, address the following points:\n",
    );
    for (idx, point) in ANALYSIS_POINTS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, point));
    }
    out.push_str(
        "\nThe output MUST be a single JSON object strictly adhering to the provided response schema. \
Do NOT include any introductory or concluding text outside the JSON.\n\
Ensure all string fields in the JSON are properly escaped if they contain special characters.\n\
The content should be professional, insightful, and directly address all parts of the request.\n\n\
User Request:\n```\n",
    );
    out.push_str(topic.trim());
    out.push_str("\n```\n");
    out
}

#[cfg(test)]
mod tests {
    use super::{build_instruction, DEFAULT_TOPIC};

    #[test]
    fn embeds_topic_and_numbered_points() {
        let instruction = build_instruction("  Optimize a bakery.  ");
        assert!(instruction.contains("User Request:\n```\nOptimize a bakery.\n```"));
        assert!(instruction.contains("1. **Optimal ways to scaffold"));
        assert!(instruction.contains("12. **Run a simulated focus group in Kansas"));
        assert!(instruction.contains("single JSON object"));
    }

    #[test]
    fn default_topic_mentions_both_brands() {
        assert!(DEFAULT_TOPIC.contains("\"Vertical AI\""));
        assert!(DEFAULT_TOPIC.contains("\"Vert\""));
        assert!(build_instruction(DEFAULT_TOPIC).ends_with("Cheers! We're off to the races now!\n```\n"));
    }
}
