//! Interactive prompt helpers shared by the add and edit forms.
//!
//! Each helper takes the already-parsed flag value first: a flag always
//! wins, `--yes` accepts the initial value, and only then is the user
//! prompted.

use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use paboard::{domain::format_date, Completion, RequirementKind, Status};

pub fn text(
    flag: Option<String>,
    prompt: &str,
    initial: &str,
    assume: bool,
) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if assume {
        return Ok(initial.to_owned());
    }
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

pub fn quantity(flag: Option<u32>, initial: u32, assume: bool) -> anyhow::Result<u32> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if assume {
        return Ok(initial);
    }
    Ok(Input::<u32>::new()
        .with_prompt("Quantity")
        .default(initial)
        .interact_text()?)
}

pub fn date(
    flag: Option<NaiveDate>,
    prompt: &str,
    initial: NaiveDate,
    assume: bool,
) -> anyhow::Result<NaiveDate> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if assume {
        return Ok(initial);
    }
    let raw = Input::<String>::new()
        .with_prompt(format!("{prompt} (dd/mm/yyyy)"))
        .default(format_date(initial))
        .validate_with(|input: &String| super::parse_date(input).map(|_| ()))
        .interact_text()?;
    super::parse_date(&raw).map_err(anyhow::Error::msg)
}

pub fn status(flag: Option<String>, initial: &Status, assume: bool) -> anyhow::Result<Status> {
    if let Some(value) = flag {
        return Ok(Status::from(value));
    }
    if assume {
        return Ok(initial.clone());
    }

    let options = ["OPEN", "ANALYSIS", "DONE", "other…"];
    let current = match initial {
        Status::Open => 0,
        Status::Analysis => 1,
        Status::Done => 2,
        Status::Other(_) => 3,
    };
    let choice = Select::new()
        .with_prompt("Status")
        .items(&options)
        .default(current)
        .interact()?;

    if choice == 3 {
        let raw = Input::<String>::new()
            .with_prompt("Status (free text)")
            .with_initial_text(initial.as_str())
            .interact_text()?;
        Ok(Status::from(raw))
    } else {
        Ok(Status::from(options[choice].to_owned()))
    }
}

pub fn completion(
    flag: Option<Completion>,
    initial: Completion,
    assume: bool,
) -> anyhow::Result<Completion> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if assume {
        return Ok(initial);
    }

    let options = ["(blank)", "YES", "NO"];
    let current = match initial {
        Completion::Unset => 0,
        Completion::Yes => 1,
        Completion::No => 2,
    };
    let choice = Select::new()
        .with_prompt("Completed")
        .items(&options)
        .default(current)
        .interact()?;
    Ok(match choice {
        1 => Completion::Yes,
        2 => Completion::No,
        _ => Completion::Unset,
    })
}

pub fn requirement(
    flag: Option<RequirementKind>,
    initial: RequirementKind,
    assume: bool,
) -> anyhow::Result<RequirementKind> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if assume {
        return Ok(initial);
    }

    let kinds = [
        RequirementKind::None,
        RequirementKind::ThreeDays,
        RequirementKind::SevenDays,
        RequirementKind::ThreeAndSevenDays,
    ];
    let options = ["none", "3 days", "7 days", "3 and 7 days"];
    let current = kinds.iter().position(|kind| *kind == initial).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Requirement")
        .items(&options)
        .default(current)
        .interact()?;
    Ok(kinds[choice])
}

pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
