//! Validation rules for projects and deliverables.

use rust_decimal::Decimal;

use super::error::ProjectError;
use super::types::{Deliverable, DeliverableUpdate, NewDeliverable, NewProject};

/// Maximum progress percentage.
pub const MAX_PROGRESS: i32 = 100;

/// Largest storable amount, `999_999_999_999_999.9999` (`NUMERIC(19,4)`).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, 4);

/// Decimal places kept for stored amounts.
pub const AMOUNT_SCALE: u32 = 4;

/// Project service for business rules.
pub struct ProjectService;

impl ProjectService {
    /// Validates project creation input.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::BlankName` for an empty name and
    /// `ProjectError::InvalidIdentifier` for an identifier that is not
    /// lowercase alphanumerics and dashes.
    pub fn validate_project(input: &NewProject) -> Result<(), ProjectError> {
        if input.name.trim().is_empty() {
            return Err(ProjectError::BlankName);
        }
        Self::validate_identifier(&input.identifier)
    }

    /// Validates a project identifier.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidIdentifier` if the identifier is empty,
    /// starts or ends with a dash, or contains anything but `[a-z0-9-]`.
    pub fn validate_identifier(identifier: &str) -> Result<(), ProjectError> {
        let valid = !identifier.is_empty()
            && !identifier.starts_with('-')
            && !identifier.ends_with('-')
            && identifier
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if valid {
            Ok(())
        } else {
            Err(ProjectError::InvalidIdentifier(identifier.to_string()))
        }
    }

    /// Validates a progress percentage and narrows it to `u8`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::ProgressOutOfRange` outside of 0..=100.
    pub fn validate_progress(progress: i32) -> Result<u8, ProjectError> {
        if (0..=MAX_PROGRESS).contains(&progress) {
            u8::try_from(progress).map_err(|_| ProjectError::ProgressOutOfRange(progress))
        } else {
            Err(ProjectError::ProgressOutOfRange(progress))
        }
    }

    /// Validates deliverable creation input, returning the checked progress.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank subject, a negative budget or spent
    /// amount, or progress outside of 0..=100.
    pub fn validate_deliverable(input: &NewDeliverable) -> Result<u8, ProjectError> {
        if input.subject.trim().is_empty() {
            return Err(ProjectError::BlankSubject);
        }
        Self::validate_amounts(Some(input.budget), Some(input.spent))?;
        Self::validate_progress(input.progress)
    }

    /// Validates and applies a partial update to a deliverable.
    ///
    /// Nothing is changed when validation fails.
    ///
    /// # Errors
    ///
    /// Same rules as [`ProjectService::validate_deliverable`] for the fields present.
    pub fn apply_update(
        deliverable: &mut Deliverable,
        update: DeliverableUpdate,
    ) -> Result<(), ProjectError> {
        if update
            .subject
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(ProjectError::BlankSubject);
        }
        Self::validate_amounts(update.budget, update.spent)?;
        let progress = update.progress.map(Self::validate_progress).transpose()?;

        if let Some(subject) = update.subject {
            deliverable.subject = subject;
        }
        if let Some(description) = update.description {
            deliverable.description = description;
        }
        if let Some(budget) = update.budget {
            deliverable.budget = budget;
        }
        if let Some(spent) = update.spent {
            deliverable.spent = spent;
        }
        if let Some(progress) = progress {
            deliverable.progress = progress;
        }
        if let Some(due_date) = update.due_date {
            deliverable.due_date = due_date;
        }

        Ok(())
    }

    fn validate_amounts(budget: Option<Decimal>, spent: Option<Decimal>) -> Result<(), ProjectError> {
        if let Some(budget) = budget {
            if budget < Decimal::ZERO {
                return Err(ProjectError::NegativeBudget);
            }
            Self::validate_storable(budget, "Budget")?;
        }
        if let Some(spent) = spent {
            if spent < Decimal::ZERO {
                return Err(ProjectError::NegativeSpent);
            }
            Self::validate_storable(spent, "Spent amount")?;
        }
        Ok(())
    }

    /// Amounts must round-trip through the database unchanged.
    fn validate_storable(amount: Decimal, field: &'static str) -> Result<(), ProjectError> {
        if amount > MAX_AMOUNT {
            return Err(ProjectError::AmountTooLarge(field));
        }
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(ProjectError::AmountTooPrecise(field));
        }
        Ok(())
    }
}
