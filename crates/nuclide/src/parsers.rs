//! Set of useful parser combinators

// internal modules
use crate::id::{IsomerState, NuclideId};

// gtools modules
use gtools_support::StringExt;

// external crates
use log::trace;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{alpha1, one_of, space0};
use nom::combinator::{eof, opt, value};
use nom::error::{Error, ErrorKind};
use nom::sequence::{delimited, preceded};
use nom::{self, Err, IResult};

/// Parse string into a usable NuclideId
///
/// Full is <element><separator><mass number><state>
///
/// - Element first, then mass e.g. Ra226, Ra-226, ra_226
/// - Numbered isomers Ba137m1 Ba137m2
/// - Fispact style isomers Ba137m Ba137n
///
/// The element must come first because things like 104mn are ambiguous, and
/// the whole input must be consumed so trailing junk is never ignored.
pub(crate) fn nuclide_id(i: &str) -> IResult<&str, NuclideId> {
    let (i, _) = space0(i)?;
    let (i, element) = element(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, mass) = mass_number(i)?;
    let (i, state) = metastable(i)?;
    let (i, _) = delimited(space0, eof, space0)(i)?;

    trace!("Parsed nuclide {element}-{mass} in state {state:?}");

    Ok((
        i,
        NuclideId {
            symbol: element.as_symbol(),
            mass,
            state,
        },
    ))
}

/// Get the element symbol
fn element(i: &str) -> IResult<&str, &str> {
    let (rest, element) = alpha1(i)?;

    if element.len() > 2 {
        Err(Err::Error(Error::new(i, ErrorKind::Fail)))
    } else {
        Ok((rest, element))
    }
}

/// Get an unsigned integer value
fn mass_number(i: &str) -> IResult<&str, u16> {
    nom::character::complete::u16(i)
}

/// Get the isomeric state from a range of possible formats and conventions
fn metastable(i: &str) -> IResult<&str, IsomerState> {
    let (i, state) = opt(alt((numbered_isomer, symbol_isomer)))(i)?;
    Ok((i, state.unwrap_or(IsomerState::Ground)))
}

/// List of possible separators people may use
fn separator(i: &str) -> IResult<&str, char> {
    one_of("_-")(i)
}

/// Get the isomer from the usual ENSDF formats m1, m2, etc...
fn numbered_isomer(i: &str) -> IResult<&str, IsomerState> {
    let (i, number) = preceded(one_of("mM"), nom::character::complete::u8)(i)?;

    match number {
        0 => Ok((i, IsomerState::Ground)),
        n => Ok((i, IsomerState::Excited(n))),
    }
}

/// Get the isomer from known fispact/common use symbols
fn symbol_isomer(i: &str) -> IResult<&str, IsomerState> {
    alt((
        value(IsomerState::Ground, one_of("gG")),
        value(IsomerState::Excited(1), one_of("mM*")),
        value(IsomerState::Excited(2), one_of("nN")),
        value(IsomerState::Excited(3), one_of("oO")),
    ))(i)
}
