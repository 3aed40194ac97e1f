//! Request builders and response parsers for terminal control.
//!
//! All functions are pure formatters/parsers or operate on a
//! [`Requester`]; none of them perform I/O themselves. Responses are
//! single-line answers in the shapes of \[PEI\] 6.9/6.11/6.14/6.15, parsed
//! with plain string scanning.

use time::{OffsetDateTime, PrimitiveDateTime, Time};
use tokio_util::sync::CancellationToken;

use tetralib_core::{Error, Requester, Result};

use crate::mode::AiMode;

/// Build a "set operating mode" request (`AT+CTOM=<mode>`), \[PEI\] 6.14.7.2.
pub fn set_operating_mode(mode: AiMode) -> String {
    format!("AT+CTOM={}", mode.code())
}

/// Read the current operating mode (`AT+CTOM?`), \[PEI\] 6.14.7.4.
pub async fn request_operating_mode(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<AiMode> {
    let response = single_line_response(token, requester, "AT+CTOM?").await?;
    let code = response
        .strip_prefix("+CTOM: ")
        .and_then(|code| code.parse::<u8>().ok())
        .ok_or_else(|| unexpected_response(&response))?;
    AiMode::from_code(code).ok_or_else(|| unexpected_response(&response))
}

/// Build a "select talkgroup" request (`AT+CTGS=1,<gtsi>`), \[PEI\] 6.15.6.2.
pub fn set_talkgroup(gtsi: &str) -> String {
    format!("AT+CTGS=1,{gtsi}")
}

/// Read the currently selected talkgroup (`AT+CTGS?`), \[PEI\] 6.15.6.4.
pub async fn request_talkgroup(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<String> {
    let response = single_line_response(token, requester, "AT+CTGS?").await?;
    let gtsi = response
        .strip_prefix("+CTGS: ")
        .and_then(|body| body.rsplit(',').next())
        .filter(|gtsi| !gtsi.is_empty() && gtsi.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| unexpected_response(&response))?;
    Ok(gtsi.to_string())
}

/// The kind of a talkgroup folder on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalkgroupKind {
    Fixed,
    Static,
    Dynamic,
}

impl TalkgroupKind {
    fn letter(self) -> char {
        match self {
            TalkgroupKind::Fixed => 'F',
            TalkgroupKind::Static => 'S',
            TalkgroupKind::Dynamic => 'D',
        }
    }
}

/// The index range of a talkgroup folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TalkgroupRange {
    pub min: u32,
    pub max: u32,
}

/// One talkgroup entry read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkgroupInfo {
    pub gtsi: String,
    pub name: String,
}

/// Read the index range of a talkgroup folder (`AT+CNUM<kind>=?`),
/// \[PEI\] 6.11.5.2.
pub async fn request_talkgroup_range(
    token: &CancellationToken,
    requester: &dyn Requester,
    kind: TalkgroupKind,
) -> Result<TalkgroupRange> {
    let request = format!("AT+CNUM{}=?", kind.letter());
    let response = single_line_response(token, requester, &request).await?;
    parse_talkgroup_range(&response).ok_or_else(|| unexpected_response(&response))
}

/// Read all talkgroups of a folder: range request, prepare, then read,
/// \[PEI\] 6.11.5.2.
pub async fn request_talkgroups(
    token: &CancellationToken,
    requester: &dyn Requester,
    kind: TalkgroupKind,
) -> Result<Vec<TalkgroupInfo>> {
    let range = request_talkgroup_range(token, requester, kind).await?;

    let prepare = format!("AT+CNUM{}=0,{},{}", kind.letter(), range.min, range.max);
    requester.request(token, &prepare).await?;

    let read = format!("AT+CNUM{}?", kind.letter());
    let responses = requester.request(token, &read).await?;
    if responses.is_empty() {
        return Err(Error::Parse("no response received".to_string()));
    }

    responses
        .iter()
        .map(|line| parse_talkgroup_info(line).ok_or_else(|| unexpected_response(line)))
        .collect()
}

/// Read the current battery charge in percent (`AT+CBC?`), \[PEI\] 6.9.
pub async fn request_battery_charge(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<u8> {
    let response = single_line_response(token, requester, "AT+CBC?").await?;
    response
        .strip_prefix("+CBC: ")
        .and_then(|body| body.rsplit(',').next())
        .and_then(|charge| charge.parse::<u8>().ok())
        .ok_or_else(|| unexpected_response(&response))
}

/// Read the current signal strength in dBm (`AT+CSQ?`), \[PEI\] 6.9.
///
/// The terminal reports a 0..=31 scale mapping to -113..-51 dBm in 2 dB
/// steps; 99 means no signal strength is available.
pub async fn request_signal_strength(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<i32> {
    let response = single_line_response(token, requester, "AT+CSQ?").await?;
    let value = response
        .strip_prefix("+CSQ: ")
        .and_then(|body| body.split(',').next())
        .and_then(|value| value.parse::<i32>().ok())
        .ok_or_else(|| unexpected_response(&response))?;

    if value == 99 {
        return Err(Error::Parse("no signal strength available".to_string()));
    }
    Ok(-113 + value * 2)
}

/// A GPS fix reported by the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsPosition {
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
    pub satellites: u32,
    /// Fix time (UTC), on the current date.
    pub timestamp: OffsetDateTime,
}

/// Read the current GPS position, satellite count, and UTC fix time
/// (`AT+GPSPOS?`).
pub async fn request_gps_position(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<GpsPosition> {
    let response = single_line_response(token, requester, "AT+GPSPOS?").await?;
    parse_gps_position(&response).ok_or_else(|| unexpected_response(&response))
}

/// Parse `+GPSPOS: <hh>:<mm>:<ss>,<N|S>: <dd>_<mm.mmmm>,<W|E>: <ddd>_<mm.mmmm>,<sats>`.
fn parse_gps_position(response: &str) -> Option<GpsPosition> {
    let body = response.strip_prefix("+GPSPOS: ")?;
    let mut fields = body.split(',');

    let clock = fields.next()?;
    let latitude = fields.next()?;
    let longitude = fields.next()?;
    let satellites = fields.next()?.parse::<u32>().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let mut clock_parts = clock.split(':');
    let hours = parse_fixed_digits(clock_parts.next()?, 2)?;
    let minutes = parse_fixed_digits(clock_parts.next()?, 2)?;
    let seconds = parse_fixed_digits(clock_parts.next()?, 2)?;
    if clock_parts.next().is_some() {
        return None;
    }

    let latitude = parse_coordinate(latitude, 'N', 'S', 2)?;
    let longitude = parse_coordinate(longitude, 'E', 'W', 3)?;

    let time = Time::from_hms(hours, minutes, seconds).ok()?;
    let today = OffsetDateTime::now_utc().date();
    let timestamp = PrimitiveDateTime::new(today, time).assume_utc();

    Some(GpsPosition {
        latitude,
        longitude,
        satellites,
        timestamp,
    })
}

/// Parse one `<D>: <deg>_<min.frac>` coordinate with its hemisphere sign.
fn parse_coordinate(field: &str, positive: char, negative: char, degree_digits: usize) -> Option<f64> {
    let (hemisphere, rest) = field.split_once(": ")?;
    let sign = match hemisphere {
        h if h.len() == 1 && h.starts_with(positive) => 1.0,
        h if h.len() == 1 && h.starts_with(negative) => -1.0,
        _ => return None,
    };

    let (degrees_str, minutes_str) = rest.split_once('_')?;
    if degrees_str.len() != degree_digits || !degrees_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let degrees = degrees_str.parse::<f64>().ok()?;
    let minutes = minutes_str.parse::<f64>().ok()?;

    Some(sign * (degrees + minutes / 60.0))
}

fn parse_fixed_digits(s: &str, digits: usize) -> Option<u8> {
    if s.len() != digits || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u8>().ok()
}

/// Parse `+CNUM<S|D|F>: (...),(<min>-<max>),(<min>-<max>)`: the lower bound
/// of the first numeric range and the upper bound of the second.
fn parse_talkgroup_range(response: &str) -> Option<TalkgroupRange> {
    let (_, body) = response.split_once(": ")?;
    if !response.starts_with("+CNUM") {
        return None;
    }

    let mut ranges = body.split(',').skip(1).map(|group| {
        let group = group.strip_prefix('(')?.strip_suffix(')')?;
        let (min, max) = group.split_once('-')?;
        Some((min.parse::<u32>().ok()?, max.parse::<u32>().ok()?))
    });

    let (min, _) = ranges.next()??;
    let (_, max) = ranges.next()??;
    Some(TalkgroupRange { min, max })
}

/// Parse one talkgroup line: `[+CNUM<S|D|F>: ]<index>,<gtsi>,<name>`.
fn parse_talkgroup_info(line: &str) -> Option<TalkgroupInfo> {
    let body = match line.split_once(": ") {
        Some((prefix, rest)) if prefix.starts_with("+CNUM") => rest,
        _ => line,
    };

    let mut fields = body.splitn(3, ',');
    let index = fields.next()?;
    let gtsi = fields.next()?;
    let name = fields.next()?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if gtsi.is_empty() || !gtsi.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(TalkgroupInfo {
        gtsi: gtsi.to_string(),
        name: name.to_string(),
    })
}

/// Issue a request and return its first response line, trimmed and
/// upper-cased.
async fn single_line_response(
    token: &CancellationToken,
    requester: &dyn Requester,
    request: &str,
) -> Result<String> {
    let responses = requester.request(token, request).await?;
    let first = responses
        .first()
        .ok_or_else(|| Error::Parse("no response received".to_string()))?;
    Ok(first.trim().to_uppercase())
}

fn unexpected_response(response: &str) -> Error {
    Error::Parse(format!("unexpected response: {response}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetralib_core::RequesterFn;

    fn scripted(
        lines: &'static [&'static str],
    ) -> RequesterFn<impl Fn(String) -> std::future::Ready<Result<Vec<String>>>> {
        RequesterFn(move |_request| {
            std::future::ready(Ok(lines.iter().map(|line| line.to_string()).collect()))
        })
    }

    #[test]
    fn set_requests_format() {
        assert_eq!(set_operating_mode(AiMode::Tmo), "AT+CTOM=0");
        assert_eq!(set_operating_mode(AiMode::Dmo), "AT+CTOM=1");
        assert_eq!(set_talkgroup("2629999123456789"), "AT+CTGS=1,2629999123456789");
    }

    #[tokio::test]
    async fn operating_mode_response() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CTOM: 1"]);
        let mode = request_operating_mode(&token, &requester).await.unwrap();
        assert_eq!(mode, AiMode::Dmo);
    }

    #[tokio::test]
    async fn operating_mode_rejects_garbage() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CTOM: X"]);
        assert!(request_operating_mode(&token, &requester).await.is_err());
    }

    #[tokio::test]
    async fn talkgroup_response_takes_last_field() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CTGS: 1,2629999123456789"]);
        let gtsi = request_talkgroup(&token, &requester).await.unwrap();
        assert_eq!(gtsi, "2629999123456789");
    }

    #[tokio::test]
    async fn battery_charge_response() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CBC: 0,73"]);
        assert_eq!(request_battery_charge(&token, &requester).await.unwrap(), 73);
    }

    #[tokio::test]
    async fn signal_strength_maps_to_dbm() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CSQ: 4,99"]);
        assert_eq!(
            request_signal_strength(&token, &requester).await.unwrap(),
            -105
        );
    }

    #[tokio::test]
    async fn signal_strength_99_is_unavailable() {
        let token = CancellationToken::new();
        let requester = scripted(&["+CSQ: 99,99"]);
        assert!(request_signal_strength(&token, &requester).await.is_err());
    }

    #[test]
    fn talkgroup_range_takes_outer_bounds() {
        let range =
            parse_talkgroup_range("+CNUMS: (MNI),(1-100),(1-500)").unwrap();
        assert_eq!(range, TalkgroupRange { min: 1, max: 500 });
        assert!(parse_talkgroup_range("+CTGS: 1,2").is_none());
    }

    #[tokio::test]
    async fn talkgroups_enumeration_flow() {
        let token = CancellationToken::new();
        let requester = RequesterFn(|request: String| async move {
            Ok(match request.as_str() {
                "AT+CNUMS=?" => vec!["+CNUMS: (MNI),(1-3),(1-500)".to_string()],
                "AT+CNUMS=0,1,500" => Vec::new(),
                "AT+CNUMS?" => vec![
                    "+CNUMS: 1,2629999123456789,Alpha".to_string(),
                    "2,2629999123456790,Bravo".to_string(),
                ],
                other => panic!("unexpected request {other}"),
            })
        });

        let groups = request_talkgroups(&token, &requester, TalkgroupKind::Static)
            .await
            .unwrap();
        assert_eq!(
            groups,
            vec![
                TalkgroupInfo {
                    gtsi: "2629999123456789".to_string(),
                    name: "Alpha".to_string(),
                },
                TalkgroupInfo {
                    gtsi: "2629999123456790".to_string(),
                    name: "Bravo".to_string(),
                },
            ]
        );
    }

    #[test]
    fn talkgroup_info_with_and_without_prefix() {
        assert_eq!(
            parse_talkgroup_info("+CNUMS: 1,2629999123456789,Fire Brigade"),
            Some(TalkgroupInfo {
                gtsi: "2629999123456789".to_string(),
                name: "Fire Brigade".to_string(),
            })
        );
        assert_eq!(
            parse_talkgroup_info("2,2629999123456790,Rescue 1,North"),
            Some(TalkgroupInfo {
                gtsi: "2629999123456790".to_string(),
                name: "Rescue 1,North".to_string(),
            })
        );
        assert!(parse_talkgroup_info("garbage").is_none());
    }

    #[tokio::test]
    async fn gps_position_parses_coordinates() {
        let token = CancellationToken::new();
        let requester = scripted(&["+GPSPOS: 12:34:56,N: 48_07.0382,E: 011_36.2445,7"]);
        let position = request_gps_position(&token, &requester).await.unwrap();

        assert!((position.latitude - (48.0 + 7.0382 / 60.0)).abs() < 1e-9);
        assert!((position.longitude - (11.0 + 36.2445 / 60.0)).abs() < 1e-9);
        assert_eq!(position.satellites, 7);
        assert_eq!(position.timestamp.hour(), 12);
        assert_eq!(position.timestamp.minute(), 34);
        assert_eq!(position.timestamp.second(), 56);
    }

    #[tokio::test]
    async fn gps_position_south_west_is_negative() {
        let token = CancellationToken::new();
        let requester = scripted(&["+GPSPOS: 00:00:01,S: 33_52.0000,W: 151_12.0000,4"]);
        let position = request_gps_position(&token, &requester).await.unwrap();

        assert!(position.latitude < 0.0);
        assert!(position.longitude < 0.0);
    }

    #[tokio::test]
    async fn gps_position_rejects_malformed_response() {
        let token = CancellationToken::new();
        let requester = scripted(&["+GPSPOS: nonsense"]);
        assert!(request_gps_position(&token, &requester).await.is_err());
    }
}
