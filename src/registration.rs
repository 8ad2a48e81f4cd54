//! Registration collaborator: validates team sign-up forms and bulk CSV imports before
//! they reach the tournament.

use crate::logic::register_team;
use crate::models::{Team, Tournament, TournamentError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;

/// Sign-up form as submitted by a coach (JSON body or one CSV row).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(alias = "teamName")]
    pub team_name: String,
    pub category: String,
    #[serde(alias = "coachName")]
    pub coach_name: String,
    pub email: String,
    pub phone: String,
}

/// Errors from validating or importing registrations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistrationError {
    /// A required field is empty.
    MissingField(&'static str),
    /// Contact email is not an address.
    InvalidEmail(String),
    /// A CSV row could not be read.
    Csv { line: u64, message: String },
    /// The tournament refused the team.
    Rejected(TournamentError),
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::MissingField(field) => write!(f, "Field {} is required", field),
            RegistrationError::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            RegistrationError::Csv { line, message } => write!(f, "CSV line {}: {}", line, message),
            RegistrationError::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistrationError {}

impl From<TournamentError> for RegistrationError {
    fn from(e: TournamentError) -> Self {
        RegistrationError::Rejected(e)
    }
}

impl RegistrationForm {
    /// Validate and trim the form into a team. All fields are required.
    pub fn into_team(self) -> Result<Team, RegistrationError> {
        let fields = [
            ("team_name", &self.team_name),
            ("category", &self.category),
            ("coach_name", &self.coach_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(RegistrationError::MissingField(*field));
        }

        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .map_or(false, |(user, domain)| !user.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(RegistrationError::InvalidEmail(email.to_string()));
        }

        Ok(Team::with_contact(
            self.team_name.trim(),
            self.category.trim(),
            self.coach_name.trim(),
            email,
            self.phone.trim(),
        ))
    }
}

/// Read forms from CSV with a header row `team_name,category,coach_name,email,phone`.
pub fn forms_from_csv<R: io::Read>(reader: R) -> Result<Vec<RegistrationForm>, RegistrationError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut forms = Vec::new();
    for row in rdr.deserialize() {
        let form: RegistrationForm = row.map_err(|e| RegistrationError::Csv {
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        forms.push(form);
    }
    Ok(forms)
}

/// Register a batch of forms. Nothing is registered unless every form is valid and new.
/// Returns the number of teams registered.
pub fn import_teams<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    forms: Vec<RegistrationForm>,
    rng: &mut R,
) -> Result<usize, RegistrationError> {
    let teams = forms
        .into_iter()
        .map(RegistrationForm::into_team)
        .collect::<Result<Vec<_>, _>>()?;

    let mut batch = HashSet::new();
    for team in &teams {
        let team_ref = team.team_ref();
        if tournament.registry.contains(&team_ref) || !batch.insert(team_ref) {
            return Err(TournamentError::DuplicateTeam {
                category: team.category.clone(),
                name: team.name.clone(),
            }
            .into());
        }
    }

    let count = teams.len();
    for team in teams {
        register_team(tournament, team, rng)?;
    }
    Ok(count)
}
