use crate::analysis::{
    AnalysisResult, ArchitectureLayer, BrandComparisonSimulation, BrandFeedback, BrandLabel,
    DataStorage, DialogueEntry, FrameworkComparison, FrameworkDetails, Hat, Participant,
    SaasArchitecture, ScriptOutline, SimulationResult, SixHatEntry,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn framework(name: &str) -> FrameworkDetails {
    FrameworkDetails {
        name: name.to_string(),
        description: format!("{name} description"),
        pros: strings(&["Fast rollout"]),
        cons: strings(&["Vendor lock-in"]),
        tech_stack: strings(&["Python", "BigQuery"]),
    }
}

fn layer(component: &str, technology: &str) -> ArchitectureLayer {
    ArchitectureLayer {
        components: strings(&[component]),
        technologies: strings(&[technology]),
    }
}

fn outline(name: &str, optimizations: Option<&[&str]>) -> ScriptOutline {
    ScriptOutline {
        name: name.to_string(),
        description: format!("{name} outline"),
        key_functions: strings(&["load_event_log", "discover_process_flow"]),
        input_output: "CSV event log in, KPI report out".to_string(),
        dependencies: strings(&["pandas"]),
        potential_optimizations: optimizations.map(strings),
    }
}

fn feedback(brand: &str) -> BrandFeedback {
    BrandFeedback {
        brand_name: brand.to_string(),
        overall_sentiment: "Mixed".to_string(),
        key_positive_points: strings(&["Memorable"]),
        key_negative_points: strings(&["Vague"]),
        recommendations: strings(&["Clarify the value proposition"]),
    }
}

/// A complete, well-formed result with every section populated.
pub(crate) fn sample_result() -> AnalysisResult {
    AnalysisResult {
        architectural_scaffolding: "Layered microservices around a process-mining core."
            .to_string(),
        code_sequencing: "Ingestion first, then discovery, then prediction.".to_string(),
        tech_stack_selection: "Python for analytics, Go for the gateway.".to_string(),
        framework_comparisons: vec![
            FrameworkComparison {
                industry: "Manufacturing".to_string(),
                framework1: framework("Lean Twin"),
                framework2: framework("Predictive Line"),
            },
            FrameworkComparison {
                industry: "Retail".to_string(),
                framework1: framework("Shelf Sense"),
                framework2: framework("Demand Mesh"),
            },
        ],
        simulation_results: vec![
            SimulationResult {
                industry: "Manufacturing".to_string(),
                framework: "Lean Twin".to_string(),
                path: "Logical Path to Success".to_string(),
                likelihood: 82,
                outcome_summary: "Downtime drops within two quarters.".to_string(),
            },
            SimulationResult {
                industry: "Retail".to_string(),
                framework: "Demand Mesh".to_string(),
                path: "Potential Path to Failure".to_string(),
                likelihood: 35,
                outcome_summary: "Data quality stalls adoption.".to_string(),
            },
        ],
        six_hat_exercise: Hat::ALL
            .iter()
            .map(|hat| SixHatEntry {
                hat: *hat,
                focus: format!("{hat} focus"),
                summary: format!("{hat} summary"),
            })
            .collect(),
        markdown_outline: "# Paths\n- Success: Lean Twin\n- Failure: Demand Mesh".to_string(),
        executive_summary: "AI-driven process optimization pays back within a year."
            .to_string(),
        saas_architecture: SaasArchitecture {
            overview: "Multi-tenant platform on GCP.".to_string(),
            data_ingestion: layer("Event collectors", "Pub/Sub"),
            processing_layer: layer("Stream jobs", "Dataflow"),
            ai_ml_deployment: layer("Model serving", "Vertex AI"),
            api_gateways: layer("Public API", "Apigee"),
            user_interface: layer("Dashboard", "React"),
            data_storage: DataStorage {
                strategy: "Hot data in Bigtable, analytics in BigQuery.".to_string(),
                technologies: strings(&["Bigtable", "BigQuery"]),
            },
            cloud_provider_focus: "Google Cloud Platform".to_string(),
            scalability_resilience_cost: "Autoscaling with regional failover.".to_string(),
        },
        process_mining_script_outline: outline(
            "process_mining_engine.py",
            Some(&["Vectorize grouping"]),
        ),
        predictive_analytics_process_script_outline: outline(
            "predictive_analytics_process.py",
            None,
        ),
        predictive_analytics_market_script_outline: outline(
            "predictive_analytics_market.py",
            Some(&["Cache market feeds"]),
        ),
        vertical_ai_layout_description: "A navy executive console with KPI tiles.".to_string(),
        vert_layout_description: "A sage-green garden of flowing insight cards.".to_string(),
        brand_comparison_simulation: BrandComparisonSimulation {
            participants: vec![
                Participant {
                    name: "Dana".to_string(),
                    persona: "Rural small business owner".to_string(),
                    location: "Topeka, KS (Rural)".to_string(),
                },
                Participant {
                    name: "Marcus".to_string(),
                    persona: "Urban tech professional".to_string(),
                    location: "Kansas City, MO (Urban)".to_string(),
                },
            ],
            dialogue_log: vec![
                DialogueEntry {
                    timestamp: "00:01".to_string(),
                    participant_name: "Dana".to_string(),
                    dialogue: "Vertical AI feels like my bank.".to_string(),
                    brand_reacted_to: Some(BrandLabel::VerticalAi),
                },
                DialogueEntry {
                    timestamp: "00:02".to_string(),
                    participant_name: "Marcus".to_string(),
                    dialogue: "Vert is **approachable**.".to_string(),
                    brand_reacted_to: Some(BrandLabel::Vert),
                },
                DialogueEntry {
                    timestamp: "00:03".to_string(),
                    participant_name: "Dana".to_string(),
                    dialogue: "Either could work.".to_string(),
                    brand_reacted_to: None,
                },
            ],
            vertical_ai_analysis: feedback("Vertical AI"),
            vert_analysis: feedback("Vert"),
            overall_branding_recommendation: "Lead with Vertical AI for enterprise buyers."
                .to_string(),
        },
    }
}
