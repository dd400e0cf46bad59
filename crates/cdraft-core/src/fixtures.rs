//! Static data sources standing in for the blueprint library and the
//! document-analysis service.

use crate::types::{Blueprint, Count};

/// Blueprints offered when starting a draft
pub fn blueprint_library() -> Vec<Blueprint> {
    vec![
        Blueprint {
            id: 1,
            name: "Complaint".to_string(),
            description: "Personal injury complaint with jury demand".to_string(),
            last_used: "2 days ago".to_string(),
        },
        Blueprint {
            id: 2,
            name: "Motion for Summary Judgment".to_string(),
            description: "Motion with statement of undisputed material facts".to_string(),
            last_used: "1 week ago".to_string(),
        },
        Blueprint {
            id: 3,
            name: "Demand Letter".to_string(),
            description: "Pre-suit settlement demand to the carrier".to_string(),
            last_used: "3 weeks ago".to_string(),
        },
        Blueprint {
            id: 4,
            name: "Answer to Counterclaim".to_string(),
            description: "Responsive pleading with affirmative defenses".to_string(),
            last_used: "1 month ago".to_string(),
        },
    ]
}

/// Look up a blueprint by id
pub fn find_blueprint(id: u32) -> Option<Blueprint> {
    blueprint_library().into_iter().find(|b| b.id == id)
}

/// Counts proposed once case analysis completes
pub fn sample_counts() -> Vec<Count> {
    vec![
        Count {
            id: 1,
            title: "Negligence".to_string(),
            description: "Defendant failed to exercise reasonable care while operating a commercial vehicle, causing the rear-end collision.".to_string(),
            selected: true,
            key_facts: vec![
                "Defendant was traveling 15 mph over the posted limit".to_string(),
                "Defendant was looking at a mobile device before impact".to_string(),
                "Road conditions were dry and visibility was clear".to_string(),
            ],
            supporting_docs: vec![
                "Police Accident Report #2023-4471".to_string(),
                "Deposition of Officer Ramirez".to_string(),
                "Dashcam footage".to_string(),
            ],
            is_custom: false,
        },
        Count {
            id: 2,
            title: "Vicarious Liability / Respondeat Superior".to_string(),
            description: "The driver was acting within the scope of employment for the delivery company at the time of the collision.".to_string(),
            selected: true,
            key_facts: vec![
                "Driver was on an assigned delivery route".to_string(),
                "Vehicle was owned and insured by the employer".to_string(),
            ],
            supporting_docs: vec![
                "Employment records".to_string(),
                "Route assignment log".to_string(),
            ],
            is_custom: false,
        },
        Count {
            id: 3,
            title: "Negligent Entrustment".to_string(),
            description: "The employer allowed a driver with prior moving violations to operate its vehicle.".to_string(),
            selected: false,
            key_facts: vec![
                "Driver had three moving violations in the prior two years".to_string(),
                "Employer did not run a motor vehicle record check".to_string(),
            ],
            supporting_docs: vec!["Driver abstract".to_string(), "Hiring file".to_string()],
            is_custom: false,
        },
        Count {
            id: 4,
            title: "Gross Negligence".to_string(),
            description: "Texting while driving a loaded commercial vehicle showed reckless disregard for others on the road.".to_string(),
            selected: false,
            key_facts: vec!["Phone records show active messaging at time of impact".to_string()],
            supporting_docs: vec!["Subpoenaed phone records".to_string()],
            is_custom: false,
        },
        Count {
            id: 5,
            title: "Loss of Consortium".to_string(),
            description: "Plaintiff's spouse lost companionship and household services during recovery.".to_string(),
            selected: false,
            key_facts: vec!["Plaintiff was unable to work or drive for six months".to_string()],
            supporting_docs: vec!["Spouse declaration".to_string()],
            is_custom: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_blueprint_ids_unique() {
        let ids: HashSet<u32> = blueprint_library().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), blueprint_library().len());
    }

    #[test]
    fn test_find_blueprint() {
        assert_eq!(find_blueprint(1).unwrap().name, "Complaint");
        assert!(find_blueprint(999).is_none());
    }

    #[test]
    fn test_sample_counts_are_not_custom_and_some_selected() {
        let counts = sample_counts();
        assert!(counts.iter().all(|c| !c.is_custom));
        assert!(counts.iter().any(|c| c.selected));
        let ids: HashSet<u32> = counts.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), counts.len());
    }
}
