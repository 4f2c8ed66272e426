use std::path::PathBuf;
use uuid::Uuid;

/// Number of blank collateral rows a fresh record starts with.
pub const INITIAL_COLLATERAL_ROWS: usize = 5;

/// The wizard's position, from the landing screen to the final confirmation.
///
/// Steps form a closed total order. `next` and `prev` clamp at the
/// boundaries instead of wrapping.
///
/// # Examples
///
/// ```
/// use loan_intake::domain::Step;
///
/// assert_eq!(Step::Start.next(), Step::ChurchInfo);
/// assert_eq!(Step::Submission.next(), Step::Submission);
/// assert_eq!(Step::Start.prev(), Step::Start);
/// assert!(Step::Collateral < Step::Attachment);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Start,
    ChurchInfo,
    LoanStatus,
    Collateral,
    Attachment,
    Submission,
}

impl Step {
    /// Every step in order.
    pub const ALL: [Step; 6] = [
        Step::Start,
        Step::ChurchInfo,
        Step::LoanStatus,
        Step::Collateral,
        Step::Attachment,
        Step::Submission,
    ];

    pub fn ordinal(self) -> usize {
        match self {
            Step::Start => 0,
            Step::ChurchInfo => 1,
            Step::LoanStatus => 2,
            Step::Collateral => 3,
            Step::Attachment => 4,
            Step::Submission => 5,
        }
    }

    /// Successor step, or `self` at `Submission`.
    pub fn next(self) -> Self {
        match self {
            Step::Start => Step::ChurchInfo,
            Step::ChurchInfo => Step::LoanStatus,
            Step::LoanStatus => Step::Collateral,
            Step::Collateral => Step::Attachment,
            Step::Attachment => Step::Submission,
            Step::Submission => Step::Submission,
        }
    }

    /// Predecessor step, or `self` at `Start`.
    pub fn prev(self) -> Self {
        match self {
            Step::Start => Step::Start,
            Step::ChurchInfo => Step::Start,
            Step::LoanStatus => Step::ChurchInfo,
            Step::Collateral => Step::LoanStatus,
            Step::Attachment => Step::Collateral,
            Step::Submission => Step::Attachment,
        }
    }

    pub fn is_first(self) -> bool {
        self == Step::Start
    }

    pub fn is_last(self) -> bool {
        self == Step::Submission
    }

    /// Heading shown above the step's form. `Start` is the landing page and has none.
    pub fn title(self) -> &'static str {
        match self {
            Step::Start => "",
            Step::ChurchInfo => "교회 기본 정보",
            Step::LoanStatus => "대출 및 재정 현황",
            Step::Collateral => "담보물 소재지 (지번 목록)",
            Step::Attachment => "교회 담당자 정보",
            Step::Submission => "약관 동의 및 최종 신청",
        }
    }

    /// Text fields edited on this step, in display order.
    pub fn text_fields(self) -> &'static [TextField] {
        match self {
            Step::Start | Step::Collateral => &[],
            Step::ChurchInfo => &[
                TextField::ChurchName,
                TextField::Denomination,
                TextField::Location,
                TextField::MemberCount,
            ],
            Step::LoanStatus => &[
                TextField::CurrentLoanAmount,
                TextField::BankName,
                TextField::CurrentInterestRate,
            ],
            Step::Attachment => &[
                TextField::ManagerName,
                TextField::Position,
                TextField::PhoneNumber,
                TextField::Email,
            ],
            Step::Submission => &[TextField::ApplicantName],
        }
    }
}

/// Input hint attached to a field. Only the terminal editor looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Email,
}

/// The scalar text fields of an [`ApplicationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ChurchName,
    Denomination,
    Location,
    MemberCount,
    CurrentLoanAmount,
    BankName,
    CurrentInterestRate,
    ManagerName,
    Position,
    PhoneNumber,
    Email,
    ApplicantName,
}

impl TextField {
    pub fn label(self) -> &'static str {
        match self {
            TextField::ChurchName => "교회명",
            TextField::Denomination => "소속 교단",
            TextField::Location => "소재지",
            TextField::MemberCount => "출석 성년 교인수 (명)",
            TextField::CurrentLoanAmount => "기존 대출금액 (원)",
            TextField::BankName => "금융기관명 (현재 거래처)",
            TextField::CurrentInterestRate => "현재 적용 금리 (%)",
            TextField::ManagerName => "담당자 성명",
            TextField::Position => "직분",
            TextField::PhoneNumber => "전화번호",
            TextField::Email => "이메일",
            TextField::ApplicantName => "신청인 성명 (전자 서명 대용)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            TextField::ChurchName => "교회 이름을 입력하세요",
            TextField::Denomination => "예: 대한예수교장로회",
            TextField::Location => "교회 주소를 입력해 주세요",
            TextField::MemberCount => "장년 기준",
            TextField::CurrentLoanAmount => "현재 대출 잔액",
            TextField::BankName => "거래 중인 은행명",
            TextField::CurrentInterestRate => "예: 6.5",
            TextField::ManagerName => "성함을 입력하세요",
            TextField::Position => "예: 담임목사, 장로, 회계",
            TextField::PhoneNumber => "010-0000-0000",
            TextField::Email => "이메일 주소",
            TextField::ApplicantName => "본인 성함을 입력하세요",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            TextField::MemberCount | TextField::CurrentLoanAmount => InputKind::Number,
            TextField::Email => InputKind::Email,
            _ => InputKind::Text,
        }
    }
}

/// One line of loan security offered by the applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollateralEntry {
    /// List key only. Never interpreted.
    pub id: Uuid,
    pub description: String,
}

impl CollateralEntry {
    /// Creates a blank entry with a fresh identifier.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// Everything the applicant enters during one session.
///
/// # Examples
///
/// ```
/// use loan_intake::domain::{ApplicationRecord, TextField};
///
/// let record = ApplicationRecord::default();
/// assert_eq!(record.collaterals.len(), 5);
/// assert_eq!(record.text(TextField::ChurchName), "");
/// assert!(!record.agreement);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
    pub church_name: String,
    pub denomination: String,
    pub location: String,
    pub member_count: String,
    pub current_loan_amount: String,
    pub bank_name: String,
    pub current_interest_rate: String,
    /// Append-only. Starts with [`INITIAL_COLLATERAL_ROWS`] blank rows.
    pub collaterals: Vec<CollateralEntry>,
    pub manager_name: String,
    pub position: String,
    pub phone_number: String,
    pub email: String,
    pub applicant_name: String,
    pub agreement: bool,
    pub photo: Option<PathBuf>,
}

impl Default for ApplicationRecord {
    fn default() -> Self {
        Self {
            church_name: String::new(),
            denomination: String::new(),
            location: String::new(),
            member_count: String::new(),
            current_loan_amount: String::new(),
            bank_name: String::new(),
            current_interest_rate: String::new(),
            collaterals: (0..INITIAL_COLLATERAL_ROWS)
                .map(|_| CollateralEntry::blank())
                .collect(),
            manager_name: String::new(),
            position: String::new(),
            phone_number: String::new(),
            email: String::new(),
            applicant_name: String::new(),
            agreement: false,
            photo: None,
        }
    }
}

impl ApplicationRecord {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ChurchName => &self.church_name,
            TextField::Denomination => &self.denomination,
            TextField::Location => &self.location,
            TextField::MemberCount => &self.member_count,
            TextField::CurrentLoanAmount => &self.current_loan_amount,
            TextField::BankName => &self.bank_name,
            TextField::CurrentInterestRate => &self.current_interest_rate,
            TextField::ManagerName => &self.manager_name,
            TextField::Position => &self.position,
            TextField::PhoneNumber => &self.phone_number,
            TextField::Email => &self.email,
            TextField::ApplicantName => &self.applicant_name,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::ChurchName => &mut self.church_name,
            TextField::Denomination => &mut self.denomination,
            TextField::Location => &mut self.location,
            TextField::MemberCount => &mut self.member_count,
            TextField::CurrentLoanAmount => &mut self.current_loan_amount,
            TextField::BankName => &mut self.bank_name,
            TextField::CurrentInterestRate => &mut self.current_interest_rate,
            TextField::ManagerName => &mut self.manager_name,
            TextField::Position => &mut self.position,
            TextField::PhoneNumber => &mut self.phone_number,
            TextField::Email => &mut self.email,
            TextField::ApplicantName => &mut self.applicant_name,
        }
    }

    /// Returns a new record with `patch` applied on top of `self`.
    ///
    /// Later entries in the patch win over earlier ones for the same field.
    pub fn merged(&self, patch: &RecordPatch) -> Self {
        let mut next = self.clone();
        for (field, value) in &patch.texts {
            *next.text_mut(*field) = value.clone();
        }
        if let Some(agreement) = patch.agreement {
            next.agreement = agreement;
        }
        next
    }

    pub fn collateral(&self, id: Uuid) -> Option<&CollateralEntry> {
        self.collaterals.iter().find(|entry| entry.id == id)
    }
}

/// A partial set of scalar field values to merge into a record.
///
/// # Examples
///
/// ```
/// use loan_intake::domain::{ApplicationRecord, RecordPatch, TextField};
///
/// let patch = RecordPatch::new()
///     .text(TextField::ChurchName, "Grace Church")
///     .agreement(true);
/// let record = ApplicationRecord::default().merged(&patch);
/// assert_eq!(record.church_name, "Grace Church");
/// assert!(record.agreement);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    texts: Vec<(TextField, String)>,
    agreement: Option<bool>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: TextField, value: impl Into<String>) -> Self {
        self.texts.push((field, value.into()));
        self
    }

    pub fn agreement(mut self, agreed: bool) -> Self {
        self.agreement = Some(agreed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.agreement.is_none()
    }
}
