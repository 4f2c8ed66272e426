//! Outgoing message assembly.
//!
//! Everything here is a pure function of an [`ApplicationRecord`]. The
//! text layout is consumed by the branch's manual intake process, so the
//! section headers, field order and placeholder strings are fixed.

use super::campaign::BRANCH_NAME;
use super::models::ApplicationRecord;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Shown in place of the collateral list when every row is blank.
pub const NO_COLLATERAL_PLACEHOLDER: &str = "입력된 담보물 정보가 없습니다.";

/// Characters `encodeURIComponent` leaves untouched, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `input` the way browsers encode a URI component.
///
/// # Examples
///
/// ```
/// use loan_intake::domain::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_uri_component("담보"), "%EB%8B%B4%EB%B3%B4");
/// ```
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Renders the non-blank collateral rows as `[담보N] description`.
///
/// Numbering counts only the rows that survive filtering. Descriptions are
/// kept as entered; trimming is used only to decide whether a row is blank.
///
/// # Examples
///
/// ```
/// use loan_intake::domain::{ApplicationRecord, collateral_section, NO_COLLATERAL_PLACEHOLDER};
///
/// let mut record = ApplicationRecord::default();
/// assert_eq!(collateral_section(&record), NO_COLLATERAL_PLACEHOLDER);
///
/// record.collaterals[2].description = "Lot 5, Main St".to_string();
/// assert_eq!(collateral_section(&record), "[담보1] Lot 5, Main St");
/// ```
pub fn collateral_section(record: &ApplicationRecord) -> String {
    let lines: Vec<String> = record
        .collaterals
        .iter()
        .filter(|entry| !entry.is_blank())
        .enumerate()
        .map(|(i, entry)| format!("[담보{}] {}", i + 1, entry.description))
        .collect();

    if lines.is_empty() {
        NO_COLLATERAL_PLACEHOLDER.to_string()
    } else {
        lines.join("\n")
    }
}

/// Subject line: `[교회대출 특판신청] {church} / {applicant}`.
pub fn message_subject(record: &ApplicationRecord) -> String {
    format!(
        "[교회대출 특판신청] {} / {}",
        record.church_name, record.applicant_name
    )
}

/// Full message body with the five labelled sections and the footer.
pub fn message_body(record: &ApplicationRecord, recipient: &str) -> String {
    format!(
        "
[교회대출 특판 신청서 접수내역]

1. 교회 기본 정보
- 교회명: {church_name}
- 교단: {denomination}
- 소재지: {location}
- 출석교인수: {member_count}명

2. 대출 및 재정 현황
- 기존 대출금액: {current_loan_amount}원
- 금융기관명: {bank_name}
- 현재 적용금리: {current_interest_rate}%

3. 담보물 소재지 (지번 목록)
{collaterals}

4. 교회 담당자 정보
- 담당자 성명: {manager_name}
- 직분: {position}
- 전화번호: {phone_number}
- 이메일: {email}

5. 최종 확인
- 신청인 성명: {applicant_name}
- 개인정보 수집 및 이용 동의: 완료

-----------------------------------------
수신처: {recipient}
본 메일은 {branch} 특판 시스템을 통해 자동 생성되었습니다.
",
        church_name = record.church_name,
        denomination = record.denomination,
        location = record.location,
        member_count = record.member_count,
        current_loan_amount = record.current_loan_amount,
        bank_name = record.bank_name,
        current_interest_rate = record.current_interest_rate,
        collaterals = collateral_section(record),
        manager_name = record.manager_name,
        position = record.position,
        phone_number = record.phone_number,
        email = record.email,
        applicant_name = record.applicant_name,
        recipient = recipient,
        branch = BRANCH_NAME,
    )
}

/// A composed application message, ready to hand to a mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// Builds the draft for `record` addressed to `recipient`.
    pub fn compose(record: &ApplicationRecord, recipient: &str) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: message_subject(record),
            body: message_body(record, recipient),
        }
    }

    /// `mailto:` URI with percent-encoded subject and body.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_intake::domain::MailDraft;
    ///
    /// let draft = MailDraft {
    ///     recipient: "desk@example.com".to_string(),
    ///     subject: "Hi there".to_string(),
    ///     body: "line 1\nline 2".to_string(),
    /// };
    /// assert_eq!(
    ///     draft.mailto_uri(),
    ///     "mailto:desk@example.com?subject=Hi%20there&body=line%201%0Aline%202"
    /// );
    /// ```
    pub fn mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }

    /// Notice shown once the draft has been handed to the mail client.
    pub fn confirmation_notice(&self) -> String {
        format!(
            "신청서 작성이 완료되었습니다.\n\n수신처: {}\n확인 버튼을 누르면 메일 앱이 실행됩니다.\n메일 작성 화면에서 '보내기'를 눌러주셔야 최종 접수됩니다.",
            self.recipient
        )
    }
}
