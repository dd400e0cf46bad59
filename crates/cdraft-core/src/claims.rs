//! Known legal theories and their count body templates
//!
//! Each [`ClaimType`] owns an ordered list of body paragraphs. Paragraph
//! numbers are not part of the templates; the generator assigns them from a
//! running counter so numbering never collides or skips across counts.
//! Titles that match no known theory fall back to [`generic_paragraphs`].

use serde::{Deserialize, Serialize};

/// Closed set of claim types with hand-written templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    Negligence,
    GrossNegligence,
    VicariousLiability,
    NegligentEntrustment,
    IntentionalInflictionOfEmotionalDistress,
    LossOfConsortium,
    PremisesLiability,
    ProductLiability,
}

impl ClaimType {
    pub const ALL: [ClaimType; 8] = [
        ClaimType::Negligence,
        ClaimType::GrossNegligence,
        ClaimType::VicariousLiability,
        ClaimType::NegligentEntrustment,
        ClaimType::IntentionalInflictionOfEmotionalDistress,
        ClaimType::LossOfConsortium,
        ClaimType::PremisesLiability,
        ClaimType::ProductLiability,
    ];

    /// Canonical count title for this theory
    pub fn title(&self) -> &'static str {
        match self {
            ClaimType::Negligence => "Negligence",
            ClaimType::GrossNegligence => "Gross Negligence",
            ClaimType::VicariousLiability => "Vicarious Liability / Respondeat Superior",
            ClaimType::NegligentEntrustment => "Negligent Entrustment",
            ClaimType::IntentionalInflictionOfEmotionalDistress => {
                "Intentional Infliction of Emotional Distress"
            }
            ClaimType::LossOfConsortium => "Loss of Consortium",
            ClaimType::PremisesLiability => "Premises Liability",
            ClaimType::ProductLiability => "Product Liability",
        }
    }

    /// Exact title match; anything else is handled by the generic template
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.title() == title)
    }

    /// Body paragraphs in pleading order
    pub fn paragraphs(&self) -> &'static [&'static str] {
        match self {
            ClaimType::Negligence => NEGLIGENCE,
            ClaimType::GrossNegligence => GROSS_NEGLIGENCE,
            ClaimType::VicariousLiability => VICARIOUS_LIABILITY,
            ClaimType::NegligentEntrustment => NEGLIGENT_ENTRUSTMENT,
            ClaimType::IntentionalInflictionOfEmotionalDistress => IIED,
            ClaimType::LossOfConsortium => LOSS_OF_CONSORTIUM,
            ClaimType::PremisesLiability => PREMISES_LIABILITY,
            ClaimType::ProductLiability => PRODUCT_LIABILITY,
        }
    }

    /// Closing prayer for relief (unnumbered)
    pub fn prayer(&self) -> &'static str {
        match self {
            ClaimType::GrossNegligence | ClaimType::IntentionalInflictionOfEmotionalDistress => {
                PRAYER_WITH_PUNITIVE
            }
            ClaimType::LossOfConsortium => PRAYER_CONSORTIUM,
            _ => PRAYER,
        }
    }
}

/// Body paragraphs for a theory with no hand-written template
pub fn generic_paragraphs(title: &str) -> Vec<String> {
    let theory = title.trim().to_lowercase();
    vec![
        format!(
            "At all times relevant hereto, Defendant [DEFENDANT NAME] owed Plaintiff [PLAINTIFF NAME] duties recognized under the law of {theory}."
        ),
        format!(
            "On or about [DATE OF INCIDENT], at or near [LOCATION], Defendant breached those duties through the acts and omissions giving rise to this claim for {theory}."
        ),
        "The conduct of Defendant was a direct and proximate cause of the injuries and losses sustained by Plaintiff.".to_string(),
        "As a result, Plaintiff has suffered and will continue to suffer damages, including economic and non-economic losses, in an amount to be proven at trial.".to_string(),
    ]
}

/// Closing prayer used by the generic template
pub const GENERIC_PRAYER: &str = PRAYER;

const PRAYER: &str = "WHEREFORE, Plaintiff [PLAINTIFF NAME] demands judgment against Defendant [DEFENDANT NAME] for compensatory damages, together with interest, costs of suit, and such other relief as the Court deems just and proper.";

const PRAYER_WITH_PUNITIVE: &str = "WHEREFORE, Plaintiff [PLAINTIFF NAME] demands judgment against Defendant [DEFENDANT NAME] for compensatory and punitive damages, together with interest, costs of suit, and such other relief as the Court deems just and proper.";

const PRAYER_CONSORTIUM: &str = "WHEREFORE, Plaintiff [SPOUSE NAME] demands judgment against Defendant [DEFENDANT NAME] for damages for loss of consortium, together with interest, costs of suit, and such other relief as the Court deems just and proper.";

const NEGLIGENCE: &[&str] = &[
    "On or about [DATE OF INCIDENT], Plaintiff [PLAINTIFF NAME] was lawfully traveling on [ROADWAY] at or near [LOCATION].",
    "At the same time and place, Defendant [DEFENDANT NAME] was operating a [VEHICLE DESCRIPTION] on [ROADWAY].",
    "At all times relevant hereto, Defendant owed Plaintiff a duty to operate the vehicle with reasonable care and in compliance with all applicable traffic laws.",
    "Defendant breached that duty by failing to maintain a proper lookout.",
    "Defendant further breached that duty by failing to keep the vehicle under proper control.",
    "Defendant further breached that duty by operating the vehicle at a speed greater than was reasonable and prudent under the conditions.",
    "Defendant further breached that duty by failing to yield the right of way and causing a collision with Plaintiff.",
    "As a direct and proximate result of Defendant's negligence, Plaintiff sustained serious and permanent bodily injuries.",
    "As a further direct and proximate result of Defendant's negligence, Plaintiff has incurred and will continue to incur medical expenses for the treatment of those injuries.",
    "As a further direct and proximate result of Defendant's negligence, Plaintiff has suffered lost wages and a diminished capacity to earn income in the future.",
    "As a further direct and proximate result of Defendant's negligence, Plaintiff has endured and will continue to endure pain, suffering, and loss of enjoyment of life.",
];

const GROSS_NEGLIGENCE: &[&str] = &[
    "The conduct of Defendant [DEFENDANT NAME] described above was not merely careless but constituted a reckless disregard for the safety of Plaintiff [PLAINTIFF NAME] and others lawfully on the roadway.",
    "Defendant knew or should have known that operating the vehicle while [IMPAIRING CONDITION] created a substantial and unjustifiable risk of serious bodily harm.",
    "Defendant consciously disregarded that risk and proceeded to operate the vehicle.",
    "The conduct of Defendant constitutes gross negligence and was a direct and proximate cause of the injuries sustained by Plaintiff.",
    "Plaintiff is entitled to an award of punitive damages to punish Defendant and deter similar conduct.",
];

const VICARIOUS_LIABILITY: &[&str] = &[
    "At all times relevant hereto, Defendant [DEFENDANT NAME] was an employee or agent of Defendant [EMPLOYER NAME].",
    "At the time of the collision, Defendant [DEFENDANT NAME] was acting within the course and scope of that employment or agency and in furtherance of the business of [EMPLOYER NAME].",
    "Under the doctrine of respondeat superior, Defendant [EMPLOYER NAME] is vicariously liable for the negligent acts and omissions of its employee or agent.",
    "As a direct and proximate result, Plaintiff [PLAINTIFF NAME] sustained the injuries and damages described herein.",
];

const NEGLIGENT_ENTRUSTMENT: &[&str] = &[
    "Defendant [OWNER NAME] owned or controlled the [VEHICLE DESCRIPTION] operated by Defendant [DEFENDANT NAME] at the time of the collision.",
    "Defendant [OWNER NAME] permitted Defendant [DEFENDANT NAME] to operate that vehicle.",
    "Defendant [OWNER NAME] knew or should have known that Defendant [DEFENDANT NAME] was incompetent, inexperienced, or reckless in the operation of a motor vehicle.",
    "By entrusting the vehicle to an operator it knew or should have known was unfit, Defendant [OWNER NAME] breached its duty of care to Plaintiff [PLAINTIFF NAME] and the motoring public.",
    "The negligent entrustment of the vehicle was a direct and proximate cause of the injuries and damages sustained by Plaintiff.",
];

const IIED: &[&str] = &[
    "The conduct of Defendant [DEFENDANT NAME] toward Plaintiff [PLAINTIFF NAME] was extreme and outrageous and exceeded all bounds of decency tolerated in a civilized community.",
    "Defendant acted intentionally or with reckless disregard of the high probability that such conduct would cause Plaintiff severe emotional distress.",
    "As a direct and proximate result of that conduct, Plaintiff has suffered severe emotional distress, including anxiety, sleeplessness, and humiliation.",
    "The emotional distress suffered by Plaintiff is of such a degree that no reasonable person could be expected to endure it.",
];

const LOSS_OF_CONSORTIUM: &[&str] = &[
    "At all times relevant hereto, Plaintiff [SPOUSE NAME] was and is the lawful spouse of Plaintiff [PLAINTIFF NAME].",
    "As a direct and proximate result of the negligence of Defendant [DEFENDANT NAME] and the injuries sustained by Plaintiff [PLAINTIFF NAME], Plaintiff [SPOUSE NAME] has been deprived of the society, companionship, services, and consortium of the injured spouse.",
    "Plaintiff [SPOUSE NAME] will continue to suffer such losses in the future.",
];

const PREMISES_LIABILITY: &[&str] = &[
    "At all times relevant hereto, Defendant [DEFENDANT NAME] owned, operated, maintained, or controlled the premises located at [PREMISES ADDRESS].",
    "On or about [DATE OF INCIDENT], Plaintiff [PLAINTIFF NAME] was lawfully on the premises as an invitee.",
    "Defendant owed Plaintiff a duty to maintain the premises in a reasonably safe condition and to warn of dangerous conditions of which it knew or should have known.",
    "A dangerous condition, namely [HAZARD DESCRIPTION], existed on the premises.",
    "Defendant knew or in the exercise of reasonable care should have known of the dangerous condition and failed to remedy it or warn Plaintiff of it.",
    "As a direct and proximate result, Plaintiff was injured and has sustained the damages described herein.",
];

const PRODUCT_LIABILITY: &[&str] = &[
    "Defendant [MANUFACTURER NAME] designed, manufactured, distributed, or sold the [PRODUCT NAME] involved in the incident.",
    "The [PRODUCT NAME] was defective in its design, manufacture, or warnings when it left the control of Defendant.",
    "The defect rendered the [PRODUCT NAME] unreasonably dangerous for its intended and reasonably foreseeable use.",
    "Plaintiff [PLAINTIFF NAME] was using the [PRODUCT NAME] in a manner that was intended or reasonably foreseeable.",
    "The defect in the [PRODUCT NAME] was a direct and proximate cause of the injuries and damages sustained by Plaintiff.",
];
