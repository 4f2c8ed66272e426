//! Fixed campaign material: landing copy, the branch contact directory,
//! and the addresses the form hands off to.

/// Mailbox that receives every application.
pub const RECIPIENT: &str = "nh170260-1@nonghyup.com";

/// Printable application form for the fax path.
pub const FORM_DOWNLOAD_URL: &str =
    "https://drive.google.com/file/d/17_PpYUsPtVHESxcctlio-CpbbywMxjmq/view?usp=drive_link";

pub const BRANCH_NAME: &str = "서울축산농협 상계역지점";
pub const FAX_NUMBER: &str = "02-3392-3916";

pub const BADGE: &str = "2026년 한정 고금리 대환 프로젝트";
pub const HEADLINE: &str = "농협 교회대출 특판 안내";
pub const TAGLINE: &str = "\"연 4.30%대 저금리로 지금 바로 갈아타십시오!\"";
pub const PREFERRED_RATE: &str = "연 4.30% ~";
pub const TOTAL_LIMIT: &str = "500억 원";
pub const AUDIENCE: &str = "대상: 수도권(서울·경기·인천) 소재 교회 신규 거래처";
pub const EXCLUSION: &str = "(기존 서울축산농협 거래처는 금차 특판에서 제외입니다)";

pub const INTRODUCTION: [&str; 2] = [
    "서울축산농협은 서울지역 전체에 28개의 금융점포를 보유한 지역농협으로서 대한민국 최대 규모를 자랑합니다.",
    "최초로 미션대출을 개발하여 수십년간 교회의 든든한 금융파트너로 함께 하여왔습니다.",
];

pub const CONSENT_TITLE: &str = "[개인정보 수집 및 이용 동의]";
pub const CONSENT_TEXT: &str = "본 신청서에 기재된 정보는 교회대출 상담 및 한도 조회 목적으로만 사용되며, 관련 법령에 따라 안전하게 보호됩니다.";
pub const CONSENT_CHECKBOX: &str = "상기 약관에 모두 동의합니다.";

/// A staff member applicants can call directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub title: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
}

pub const CONTACTS: [Contact; 3] = [
    Contact {
        title: "과장",
        name: "정창운",
        phone: "02-2181-5228",
    },
    Contact {
        title: "부지점장",
        name: "장정숙",
        phone: "02-2181-5221",
    },
    Contact {
        title: "지점장",
        name: "김대윤",
        phone: "010-7399-5380",
    },
];

impl Contact {
    /// `tel:` URI for click-to-call capable terminals.
    pub fn tel_uri(&self) -> String {
        format!("tel:{}", self.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_tel_uri() {
        assert_eq!(CONTACTS[2].tel_uri(), "tel:010-7399-5380");
    }

    #[test]
    fn test_directory_order() {
        let titles: Vec<&str> = CONTACTS.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["과장", "부지점장", "지점장"]);
    }
}
