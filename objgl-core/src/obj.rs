/// OBJ record classifier for `v`, `vn` and `f` lines
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till1, take_while},
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize, rest},
    multi::many0,
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::{ObjError, ObjResult};
use crate::geometry::{FaceRef, Normal, Position};

/// Kind of record, decided by the first token of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Position,
    Normal,
    Face,
}

impl RecordKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "v" => Some(Self::Position),
            "vn" => Some(Self::Normal),
            "f" => Some(Self::Face),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Position => "v",
            Self::Normal => "vn",
            Self::Face => "f",
        }
    }
}

/// A parsed record
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Position(Position),
    Normal(Normal),
    Face(Vec<FaceRef>),
}

/// A classified but not yet parsed line
///
/// Splitting classification from parsing lets a driver ignore malformed
/// records of a kind it does not convert.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord<'a> {
    pub kind: RecordKind,
    pub fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    /// Parse the fields of this record; `line` is 1-based and only used in errors
    pub fn parse(&self, line: usize) -> ObjResult<Record> {
        match self.kind {
            RecordKind::Position => {
                let [x, y, z] = self.vector3(line)?;
                Ok(Record::Position(Position::new(x, y, z)))
            }
            RecordKind::Normal => {
                let [x, y, z] = self.vector3(line)?;
                Ok(Record::Normal(Normal::new(x, y, z)))
            }
            RecordKind::Face => Ok(Record::Face(self.face_refs(line)?)),
        }
    }

    /// The first three fields as floats; any further fields (e.g. `w`) are ignored
    pub fn vector3(&self, line: usize) -> ObjResult<[f64; 3]> {
        if self.fields.len() < 3 {
            return Err(ObjError::MissingField {
                line,
                tag: self.kind.tag(),
                expected: 3,
                found: self.fields.len(),
            });
        }
        Ok([
            coordinate(self.fields[0], line)?,
            coordinate(self.fields[1], line)?,
            coordinate(self.fields[2], line)?,
        ])
    }

    /// Every field as a face-vertex reference
    pub fn face_refs(&self, line: usize) -> ObjResult<Vec<FaceRef>> {
        self.fields
            .iter()
            .map(|field| face_ref(field, line))
            .collect()
    }
}

/// Classify a raw line by its first whitespace-delimited token
///
/// Blank lines, comments and unknown tags yield `None`.
pub fn classify(line: &str) -> Option<RawRecord<'_>> {
    let (_, tokens) = tokens(line).ok()?;
    let (tag, fields) = tokens.split_first()?;
    let kind = RecordKind::from_tag(tag)?;
    Some(RawRecord {
        kind,
        fields: fields.to_vec(),
    })
}

/// Classify and parse a line in one step
pub fn parse_record(line: &str, line_no: usize) -> ObjResult<Option<Record>> {
    match classify(line) {
        Some(raw) => raw.parse(line_no).map(Some),
        None => Ok(None),
    }
}

fn token(input: &str) -> IResult<&str, &str> {
    preceded(
        take_while(|c: char| c.is_whitespace()),
        take_till1(|c: char| c.is_whitespace()),
    )(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    many0(token)(input)
}

/// Signed `inf`, `infinity` or `nan` in any case
fn non_finite(input: &str) -> IResult<&str, f64> {
    map(
        pair(
            opt(one_of("+-")),
            alt((tag_no_case("infinity"), tag_no_case("inf"), tag_no_case("nan"))),
        ),
        |(sign, word): (Option<char>, &str)| {
            let value = if word.eq_ignore_ascii_case("nan") {
                f64::NAN
            } else {
                f64::INFINITY
            };
            if sign == Some('-') {
                -value
            } else {
                value
            }
        },
    )(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    all_consuming(alt((non_finite, double)))(input)
}

/// `12`, `12/3`, `12//7`, `12/3/7`; only the leading index is kept
fn vertex_index(input: &str) -> IResult<&str, i64> {
    all_consuming(terminated(
        map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| {
            s.parse::<i64>()
        }),
        opt(preceded(char('/'), rest)),
    ))(input)
}

fn coordinate(token: &str, line: usize) -> ObjResult<f64> {
    number(token)
        .map(|(_, value)| value)
        .map_err(|_| ObjError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

fn face_ref(token: &str, line: usize) -> ObjResult<FaceRef> {
    vertex_index(token)
        .map(|(_, index)| FaceRef::new(index))
        .map_err(|_| ObjError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}
