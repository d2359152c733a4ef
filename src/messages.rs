//! User-facing result messages.
//!
//! Every failure surfaced to the client is one of these short Korean
//! sentences; raw error text and internal identifiers never leave the
//! server. Centralized so actions stay consistent and tests can assert
//! exact strings.

pub const ALREADY_AUTHENTICATED: &str = "이미 로그인되어 있습니다";
pub const LOGIN_FAILED: &str = "아이디/비밀번호가 일치하지 않습니다";
pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다";
pub const APPROVAL_PENDING: &str = "관리자 승인 대기 중입니다";

pub const EMAIL_INVALID: &str = "올바른 이메일 형식이 아닙니다";
pub const EMAIL_TAKEN: &str = "이미 등록된 이메일입니다";
pub const NAME_REQUIRED: &str = "이름을 입력해주세요";
pub const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요";
pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 8자 이상이어야 합니다";
pub const PASSWORD_CONFIRM_MISMATCH: &str = "비밀번호가 일치하지 않습니다";
pub const SIGNUP_DONE: &str = "가입이 완료되었습니다. 관리자 승인 후 이용할 수 있습니다";

pub const INTEREST_NAME_INVALID: &str = "관심사 이름을 확인해주세요";
pub const INTEREST_DUPLICATE: &str = "이미 등록된 관심사입니다";

pub const TITLE_REQUIRED: &str = "제목을 입력해주세요";
pub const URL_INVALID: &str = "올바른 URL 형식이 아닙니다";
pub const PAPER_REGISTERED: &str = "논문이 등록되었습니다. 분석이 완료되면 서재에 추가됩니다";
pub const FEED_ADDED: &str = "RSS 주소가 등록되었습니다";
pub const FEED_DUPLICATE: &str = "이미 등록된 RSS 주소입니다";

pub const NOT_FOUND: &str = "요청한 항목을 찾을 수 없습니다";
pub const INTERNAL: &str = "일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요";
