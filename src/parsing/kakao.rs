//! Shared KakaoTalk parsing utilities.
//!
//! This module contains the line grammar and the single-state line decoder
//! shared between the in-memory and streaming parsers.
//!
//! A KakaoTalk PC export looks like this:
//!
//! ```text
//! --------------- 2024년 3월 5일 화요일 ---------------
//! [민수] [오전 9:05] 배송이 아직 안 왔어요
//! [지은] [오후 2:30] 교과서 누락됐어요
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::Message;
use crate::config::{KakaoConfig, PreHeaderPolicy};

/// `--------------- 2024년 3월 5일 화요일 ---------------`
const DATE_HEADER_PATTERN: &str = r"^-{10,}\s*(\d{4}년 \d{1,2}월 \d{1,2}일.*?)\s*-{10,}";

/// `[user] [오전 9:05] text`
const MESSAGE_PATTERN: &str = r"^\[(.*?)\] \[(오전|오후) (\d{1,2}):(\d{2})\] (.+)$";

/// The `<year>년 <month>월 <day>일` part of a date phrase.
const CALENDAR_DATE_PATTERN: &str = r"(\d{4})년 (\d{1,2})월 (\d{1,2})일";

static DATE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_HEADER_PATTERN).expect("date header pattern is valid"));
static MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MESSAGE_PATTERN).expect("message pattern is valid"));
static CALENDAR_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CALENDAR_DATE_PATTERN).expect("calendar date pattern is valid"));

/// Half of the day in 12-hour notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// 오전
    Am,
    /// 오후
    Pm,
}

impl Period {
    /// Parses the locale token used in exports.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "오전" => Some(Period::Am),
            "오후" => Some(Period::Pm),
            _ => None,
        }
    }

    /// Returns the locale token for this period.
    pub fn token(self) -> &'static str {
        match self {
            Period::Am => "오전",
            Period::Pm => "오후",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Converts a 12-hour clock reading to zero-padded 24-hour `HH:MM`.
///
/// 오전 12 is midnight (`00`), 오후 12 is noon (`12`), 오후 1–11 gain 12.
/// Returns `None` for hours outside 1–12 or minutes outside 0–59.
///
/// ```
/// use issueradar::parsing::kakao::{Period, to_24_hour};
///
/// assert_eq!(to_24_hour(Period::Am, 9, 5).as_deref(), Some("09:05"));
/// assert_eq!(to_24_hour(Period::Pm, 2, 30).as_deref(), Some("14:30"));
/// assert_eq!(to_24_hour(Period::Am, 12, 0).as_deref(), Some("00:00"));
/// assert_eq!(to_24_hour(Period::Pm, 12, 15).as_deref(), Some("12:15"));
/// assert!(to_24_hour(Period::Pm, 13, 0).is_none());
/// ```
pub fn to_24_hour(period: Period, hour: u32, minute: u32) -> Option<String> {
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour = match (period, hour) {
        (Period::Am, 12) => 0,
        (Period::Am, h) | (Period::Pm, h @ 12) => h,
        (Period::Pm, h) => h + 12,
    };
    Some(format!("{hour:02}:{minute:02}"))
}

/// Returns the date phrase if `line` is a date header.
pub fn match_date_header(line: &str) -> Option<&str> {
    DATE_HEADER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A message line split into its parts, with the time already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine<'a> {
    /// Speaker name between the first pair of brackets.
    pub user: &'a str,
    /// 24-hour `HH:MM`.
    pub time: String,
    /// Everything after the time bracket.
    pub text: &'a str,
}

/// Returns the decoded parts if `line` is a well-formed message line.
///
/// Lines with an impossible clock reading (hour 0 or above 12, minute above
/// 59) do not match.
pub fn match_message_line(line: &str) -> Option<MessageLine<'_>> {
    let caps = MESSAGE_RE.captures(line)?;
    let user = caps.get(1)?.as_str();
    let period = Period::from_token(caps.get(2)?.as_str())?;
    let hour: u32 = caps.get(3)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(4)?.as_str().parse().ok()?;
    let text = caps.get(5)?.as_str();

    Some(MessageLine {
        user,
        time: to_24_hour(period, hour, minute)?,
        text,
    })
}

/// What a single export line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A dashed date header carrying the date phrase.
    DateHeader(&'a str),
    /// A chat message.
    Message(MessageLine<'a>),
    /// Anything else: notices, blank lines, continuations, malformed lines.
    Other,
}

/// Classifies one line of an export.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(phrase) = match_date_header(line) {
        return LineKind::DateHeader(phrase);
    }
    match match_message_line(line) {
        Some(msg) => LineKind::Message(msg),
        None => LineKind::Other,
    }
}

/// Extracts the calendar date from a free-form date phrase.
///
/// Only the `<year>년 <month>월 <day>일` portion is considered; trailing text
/// such as the weekday is ignored. Impossible dates yield `None`.
///
/// ```
/// use chrono::NaiveDate;
/// use issueradar::parsing::kakao::normalize_date;
///
/// assert_eq!(
///     normalize_date("2024년 3월 5일 화요일"),
///     NaiveDate::from_ymd_opt(2024, 3, 5)
/// );
/// assert_eq!(normalize_date("2024년 13월 1일"), None);
/// assert_eq!(normalize_date("어제"), None);
/// ```
pub fn normalize_date(phrase: &str) -> Option<NaiveDate> {
    let caps = CALENDAR_DATE_RE.captures(phrase)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strips a UTF-8 byte order mark, which Windows exports often carry.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Caller-supplied predicate deciding whether a record is kept.
pub type RecordPredicate = Arc<dyn Fn(&Message) -> bool + Send + Sync>;

/// Counters collected while decoding, used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Lines fed to the decoder.
    pub lines: usize,
    /// Date headers seen.
    pub headers: usize,
    /// Records emitted.
    pub records: usize,
    /// Lines that were neither a header nor a message.
    pub ignored: usize,
    /// Messages dropped because no date header preceded them.
    pub undated_dropped: usize,
    /// Messages removed by system-account, sentinel or predicate filters.
    pub filtered: usize,
}

/// Line-at-a-time decoder carrying the current date as its only state.
///
/// Both [`KakaoParser`](crate::parsers::KakaoParser) and the streaming
/// iterator feed lines through this type, so they agree record for record.
pub struct LineDecoder {
    current_date: Option<String>,
    pre_header: PreHeaderPolicy,
    system_users: Vec<String>,
    sentinel_prefixes: Vec<String>,
    predicate: Option<RecordPredicate>,
    stats: DecodeStats,
}

impl LineDecoder {
    /// Creates a decoder from parser configuration.
    pub fn new(config: &KakaoConfig, predicate: Option<RecordPredicate>) -> Self {
        Self {
            current_date: None,
            pre_header: config.pre_header,
            system_users: config.system_users.clone(),
            sentinel_prefixes: config.sentinel_prefixes.clone(),
            predicate,
            stats: DecodeStats::default(),
        }
    }

    /// Feeds one line (1-based `line_no`) and returns the record it produced.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Option<Message> {
        self.stats.lines += 1;
        let line = line.trim_end_matches(['\r', '\n']);

        let parts = match classify_line(line) {
            LineKind::DateHeader(phrase) => {
                self.current_date = Some(phrase.to_string());
                self.stats.headers += 1;
                return None;
            }
            LineKind::Message(parts) => parts,
            LineKind::Other => {
                self.stats.ignored += 1;
                return None;
            }
        };

        if self.current_date.is_none() && self.pre_header == PreHeaderPolicy::Drop {
            self.stats.undated_dropped += 1;
            return None;
        }

        if self.is_system(parts.user, parts.text) {
            self.stats.filtered += 1;
            return None;
        }

        let msg = Message {
            date: self.current_date.clone(),
            user: parts.user.to_string(),
            time: parts.time,
            text: parts.text.to_string(),
            line: line_no,
        };

        if let Some(keep) = &self.predicate {
            if !keep(&msg) {
                self.stats.filtered += 1;
                return None;
            }
        }

        self.stats.records += 1;
        Some(msg)
    }

    /// Returns the date phrase currently in effect.
    pub fn current_date(&self) -> Option<&str> {
        self.current_date.as_deref()
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    fn is_system(&self, user: &str, text: &str) -> bool {
        self.system_users.iter().any(|u| u == user)
            || self
                .sentinel_prefixes
                .iter()
                .any(|p| !p.is_empty() && text.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_header() {
        assert_eq!(
            match_date_header("----------2024년 3월 5일 화요일----------"),
            Some("2024년 3월 5일 화요일")
        );
        assert_eq!(
            match_date_header("--------------- 2024년 12월 25일 수요일 ---------------"),
            Some("2024년 12월 25일 수요일")
        );
        // nine dashes is not enough
        assert_eq!(match_date_header("---------2024년 3월 5일---------"), None);
        assert_eq!(match_date_header("2024년 3월 5일"), None);
    }

    #[test]
    fn test_message_line() {
        let msg = match_message_line("[민수] [오전 9:05] 배송이 아직 안 왔어요").unwrap();
        assert_eq!(msg.user, "민수");
        assert_eq!(msg.time, "09:05");
        assert_eq!(msg.text, "배송이 아직 안 왔어요");

        let msg = match_message_line("[지은] [오후 2:30] 교과서 누락됐어요").unwrap();
        assert_eq!(msg.time, "14:30");
    }

    #[test]
    fn test_malformed_message_lines() {
        assert!(match_message_line("민수 [오전 9:05] 안녕").is_none());
        assert!(match_message_line("[민수] [오전 9:5] 안녕").is_none());
        assert!(match_message_line("[민수] [오전 9:75] 안녕").is_none());
        assert!(match_message_line("[민수] [오전 13:05] 안녕").is_none());
        assert!(match_message_line("[민수] [오전 0:05] 안녕").is_none());
        assert!(match_message_line("[민수] [AM 9:05] 안녕").is_none());
        assert!(match_message_line("[민수] [오전 9:05] ").is_none());
        assert!(match_message_line("").is_none());
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(to_24_hour(Period::Am, 12, 0).unwrap(), "00:00");
        assert_eq!(to_24_hour(Period::Am, 12, 59).unwrap(), "00:59");
        assert_eq!(to_24_hour(Period::Pm, 12, 0).unwrap(), "12:00");
        assert_eq!(to_24_hour(Period::Pm, 11, 59).unwrap(), "23:59");
        assert_eq!(to_24_hour(Period::Am, 1, 0).unwrap(), "01:00");
    }

    #[test]
    fn test_classify_line() {
        assert!(matches!(
            classify_line("----------2024년 1월 1일 월요일----------"),
            LineKind::DateHeader(_)
        ));
        assert!(matches!(
            classify_line("[a] [오후 1:00] b"),
            LineKind::Message(_)
        ));
        assert_eq!(classify_line("민수님이 들어왔습니다."), LineKind::Other);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(
            normalize_date("2024년 3월 5일 화요일"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            normalize_date("2023년 11월 30일"),
            NaiveDate::from_ymd_opt(2023, 11, 30)
        );
        assert_eq!(normalize_date("2024년 2월 30일"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}abc"), "abc");
        assert_eq!(strip_bom("abc"), "abc");
    }

    #[test]
    fn test_decoder_tracks_current_date() {
        let mut decoder = LineDecoder::new(&KakaoConfig::default(), None);
        assert!(decoder.feed(1, "[a] [오전 9:00] 너무 이른 메시지").is_none());
        assert!(decoder.feed(2, "----------2024년 3월 5일 화요일----------").is_none());
        assert_eq!(decoder.current_date(), Some("2024년 3월 5일 화요일"));

        let msg = decoder.feed(3, "[a] [오전 9:00] 안녕하세요\r\n").unwrap();
        assert_eq!(msg.date(), Some("2024년 3월 5일 화요일"));
        assert_eq!(msg.text, "안녕하세요");
        assert_eq!(msg.line, 3);

        let stats = decoder.stats();
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.headers, 1);
        assert_eq!(stats.records, 1);
        assert_eq!(stats.undated_dropped, 1);
    }

    #[test]
    fn test_decoder_keep_policy() {
        let config = KakaoConfig::new().with_pre_header(PreHeaderPolicy::Keep);
        let mut decoder = LineDecoder::new(&config, None);
        let msg = decoder.feed(1, "[a] [오후 3:00] 날짜 없음").unwrap();
        assert!(msg.date.is_none());
        assert_eq!(msg.time, "15:00");
    }

    #[test]
    fn test_decoder_system_filters() {
        let config = KakaoConfig::new()
            .with_system_users(vec!["알림봇".to_string()])
            .with_sentinel_prefixes(vec!["[오류]".to_string()]);
        let mut decoder = LineDecoder::new(&config, None);
        decoder.feed(1, "----------2024년 3월 5일----------");
        assert!(decoder.feed(2, "[알림봇] [오전 9:00] 점검 안내").is_none());
        assert!(decoder.feed(3, "[민수] [오전 9:01] [오류] 전송 실패").is_none());
        assert!(decoder.feed(4, "[민수] [오전 9:02] 정상 메시지").is_some());
        assert_eq!(decoder.stats().filtered, 2);
    }

    #[test]
    fn test_decoder_predicate() {
        let keep_only_minsu: RecordPredicate = Arc::new(|m: &Message| m.user == "민수");
        let mut decoder = LineDecoder::new(&KakaoConfig::default(), Some(keep_only_minsu));
        decoder.feed(1, "----------2024년 3월 5일----------");
        assert!(decoder.feed(2, "[지은] [오전 9:00] 안녕").is_none());
        assert!(decoder.feed(3, "[민수] [오전 9:00] 안녕").is_some());
    }
}
