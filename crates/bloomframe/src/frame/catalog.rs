//! Read-only catalog of challenges, credentials, and projects.
//!
//! Loaded once at startup (JSON file or built-in demo data) and shared
//! behind an `Arc`; nothing mutates it while requests are served.

use anyhow::{Context, Result};
use bloom_common::{BloomError, Challenge, Credential, Difficulty, Project};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Ordered, immutable catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    challenges: Vec<Challenge>,
    #[serde(default)]
    credentials: Vec<Credential>,
    #[serde(default)]
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(
        challenges: Vec<Challenge>,
        credentials: Vec<Credential>,
        projects: Vec<Project>,
    ) -> Result<Self, BloomError> {
        let catalog = Self {
            challenges,
            credentials,
            projects,
        };
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw).context("Failed to parse catalog")?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    fn check_unique_ids(&self) -> Result<(), BloomError> {
        fn unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), BloomError> {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    return Err(BloomError::Catalog(format!("duplicate {kind} id {id}")));
                }
            }
            Ok(())
        }

        unique("challenge", self.challenges.iter().map(|c| c.challenge_id.as_str()))?;
        unique("credential", self.credentials.iter().map(|c| c.credential_id.as_str()))?;
        unique("project", self.projects.iter().map(|p| p.project_id.as_str()))
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn challenge_at(&self, position: usize) -> Option<&Challenge> {
        self.challenges.get(position)
    }

    pub fn challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.challenge_id == challenge_id)
    }

    pub fn challenge_position(&self, challenge_id: &str) -> Option<usize> {
        self.challenges
            .iter()
            .position(|c| c.challenge_id == challenge_id)
    }

    /// Credentials held by a viewer, in catalog order
    pub fn credentials_for(&self, viewer_id: u64) -> Vec<&Credential> {
        self.credentials
            .iter()
            .filter(|c| c.holders.contains(&viewer_id))
            .collect()
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_at(&self, position: usize) -> Option<&Project> {
        self.projects.get(position)
    }

    /// Built-in demo catalog
    pub fn demo() -> Self {
        let challenges = vec![
            challenge(
                "ch1",
                "Build a React Todo App",
                "Create a fully functional todo application using React hooks and local storage. Include add, edit, delete, and filter functionality.",
                &["React", "JavaScript", "CSS"],
                Difficulty::Beginner,
                "Submit a GitHub repository link with a working demo and README file.",
            ),
            challenge(
                "ch2",
                "API Design Challenge",
                "Design and implement a RESTful API for a blog platform with authentication, CRUD operations, and proper error handling.",
                &["Node.js", "Express", "MongoDB", "JWT"],
                Difficulty::Intermediate,
                "Provide API documentation, test cases, and deployment instructions.",
            ),
            challenge(
                "ch3",
                "Machine Learning Model",
                "Build a machine learning model to predict house prices using the Boston Housing dataset. Include data preprocessing and model evaluation.",
                &["Python", "Scikit-learn", "Pandas", "NumPy"],
                Difficulty::Advanced,
                "Submit a Jupyter notebook with detailed analysis and model performance metrics.",
            ),
            challenge(
                "ch4",
                "Mobile App UI Design",
                "Design a complete mobile app interface for a fitness tracking application with modern UI/UX principles.",
                &["Figma", "UI Design", "UX Research"],
                Difficulty::Intermediate,
                "Provide Figma file with interactive prototypes and design system documentation.",
            ),
            challenge(
                "ch5",
                "Smart Contract Development",
                "Create a smart contract for a decentralized voting system with proper security measures and gas optimization.",
                &["Solidity", "Web3", "Ethereum"],
                Difficulty::Advanced,
                "Submit contract code, test suite, and deployment scripts with security audit report.",
            ),
        ];

        // Holders: 123 (alice.eth), 456 (bob.eth), 789 (charlie.eth)
        let credentials = vec![
            credential("cred1", "React Development", (2024, 1, 15), 1, &[123]),
            credential("cred2", "API Design", (2024, 1, 10), 2, &[456]),
            credential("cred3", "UI/UX Design", (2024, 1, 5), 3, &[123]),
            credential("cred4", "Smart Contracts", (2023, 12, 20), 4, &[]),
            credential("cred5", "Data Analysis", (2023, 12, 15), 5, &[456, 789]),
        ];

        let projects = vec![
            project(
                "proj1",
                "DeFi Dashboard",
                "A comprehensive dashboard for tracking DeFi investments across multiple protocols with real-time data and portfolio analytics.",
                &["React", "Web3", "TypeScript", "Chart.js"],
                "user1",
                &["user1", "user2"],
            ),
            project(
                "proj2",
                "AI Content Generator",
                "An AI-powered tool for generating marketing content, blog posts, and social media captions with customizable tone and style.",
                &["Python", "OpenAI API", "Flask", "React"],
                "user3",
                &["user3"],
            ),
            project(
                "proj3",
                "Sustainable Living App",
                "A mobile app that helps users track their carbon footprint and provides personalized recommendations for sustainable living.",
                &["React Native", "Node.js", "MongoDB", "UI Design"],
                "user4",
                &["user4", "user5", "user6"],
            ),
        ];

        Self {
            challenges,
            credentials,
            projects,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn challenge(
    id: &str,
    title: &str,
    description: &str,
    skills: &[&str],
    difficulty_level: Difficulty,
    guidelines: &str,
) -> Challenge {
    Challenge {
        challenge_id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        skills_required: strings(skills),
        difficulty_level,
        submission_guidelines: guidelines.to_string(),
    }
}

fn credential(
    id: &str,
    skill_name: &str,
    (year, month, day): (i32, u32, u32),
    proof: u8,
    holders: &[u64],
) -> Credential {
    Credential {
        credential_id: id.to_string(),
        skill_name: skill_name.to_string(),
        issuance_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        verification_proof_url: Some(format!("https://ipfs.io/ipfs/QmExample{proof}")),
        issuer_id: "skillbloom".to_string(),
        holders: holders.to_vec(),
    }
}

fn project(
    id: &str,
    title: &str,
    description: &str,
    skills: &[&str],
    creator_id: &str,
    team: &[&str],
) -> Project {
    Project {
        project_id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        required_skills: strings(skills),
        creator_id: creator_id.to_string(),
        team_members: strings(team),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Catalog with `challenges` numbered challenges (ch1..), every credential
    /// held by viewer 1, and `projects` numbered projects
    pub fn sized(challenges: usize, credentials: usize, projects: usize) -> Catalog {
        let challenges = (1..=challenges)
            .map(|i| {
                challenge(
                    &format!("ch{i}"),
                    &format!("Challenge {i}"),
                    "Do the thing",
                    &["Rust"],
                    Difficulty::Beginner,
                    "Link a repo",
                )
            })
            .collect();
        let credentials = (1..=credentials)
            .map(|i| credential(&format!("cred{i}"), &format!("Skill {i}"), (2024, 1, 1), 1, &[1]))
            .collect();
        let projects = (1..=projects)
            .map(|i| project(&format!("proj{i}"), &format!("Project {i}"), "Build", &[], "u", &[]))
            .collect();
        Catalog::new(challenges, credentials, projects).unwrap()
    }
}
