use super::models::Step;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Final submission attempted without the consent checkbox ticked.
    #[error("약관에 동의하셔야 신청이 완료됩니다.")]
    AgreementRequired,
    #[error("final submission is only possible on the last step (current: {step:?})")]
    NotAtSubmission { step: Step },
}

pub type DomainResult<T> = Result<T, DomainError>;
