use super::format::{numeric, split_fields, RecordError, SkipReason};
use super::model::{Example, Label};

// ---------------------------------------------------------------------------
// Census-income parser
// ---------------------------------------------------------------------------
//
// Input columns: age, workclass, fnlwgt, education, education-num,
// marital-status, occupation, relationship, race, sex, capital-gain,
// capital-loss, hours-per-week, native-country, income.
//
// Output vector (14 values, fixed order): the six scaled numerics first,
// then the eight categorical encodings.

/// Fields per record: 14 attributes plus the income label.
const FIELD_COUNT: usize = 15;

pub(crate) fn parse_line(line: &str) -> Result<Example, RecordError> {
    let fields = split_fields(line, ',');
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::Skip(SkipReason::FieldCount));
    }

    // The census files pad fields with spaces after each comma.
    let fields: Vec<&str> = fields
        .iter()
        .map(|field| field.trim_matches(|c: char| c == ' ' || c == '\t'))
        .collect();

    if fields.iter().any(|field| *field == "?" || field.is_empty()) {
        return Err(RecordError::Skip(SkipReason::MissingValue));
    }

    let label = match fields[14] {
        "<=50K" => Label::Negative,
        ">50K" => Label::Positive,
        _ => return Err(RecordError::Skip(SkipReason::UnknownLabel)),
    };

    let mut values = Vec::with_capacity(14);

    // Numeric attributes, scaled into comparable ranges. The heavy-tailed
    // ones go through log(x + 1) first.
    values.push(numeric(fields[0]) / 100.0); // age
    values.push((numeric(fields[2]) + 1.0).ln() / 20.0); // fnlwgt
    values.push(numeric(fields[4]) / 20.0); // education-num
    values.push((numeric(fields[10]) + 1.0).ln() / 15.0); // capital-gain
    values.push((numeric(fields[11]) + 1.0).ln() / 15.0); // capital-loss
    values.push(numeric(fields[12]) / 100.0); // hours-per-week

    // Categorical attributes. Unrecognized values encode as 0, they do not
    // reject the record.
    values.push(workclass_code(fields[1]));
    values.push(education_code(fields[3]));
    values.push(married_code(fields[5]));
    values.push(occupation_code(fields[6]));
    values.push(relationship_code(fields[7]));
    values.push(race_code(fields[8]));
    values.push(if fields[9] == "Male" { 1.0 } else { 0.0 });
    values.push(if fields[13] == "United-States" { 1.0 } else { 0.0 });

    Ok(Example::new(label, values))
}

fn workclass_code(value: &str) -> f32 {
    match value {
        "Private" => 1.0,
        "Self-emp-not-inc" => 2.0,
        "Self-emp-inc" => 3.0,
        "Federal-gov" => 4.0,
        "Local-gov" => 5.0,
        "State-gov" => 6.0,
        "Without-pay" => 7.0,
        "Never-worked" => 8.0,
        _ => 0.0,
    }
}

/// Education levels in ascending order of attainment.
fn education_code(value: &str) -> f32 {
    match value {
        "Preschool" => 1.0,
        "1st-4th" => 2.0,
        "5th-6th" => 3.0,
        "7th-8th" => 4.0,
        "9th" => 5.0,
        "10th" => 6.0,
        "11th" => 7.0,
        "12th" => 8.0,
        "HS-grad" => 9.0,
        "Some-college" => 10.0,
        "Assoc-voc" => 11.0,
        "Assoc-acdm" => 12.0,
        "Bachelors" => 13.0,
        "Masters" => 14.0,
        "Prof-school" => 15.0,
        "Doctorate" => 16.0,
        _ => 0.0,
    }
}

/// Collapsed to married / not married.
fn married_code(value: &str) -> f32 {
    match value {
        "Married-civ-spouse" | "Married-AF-spouse" | "Married-spouse-absent" => 1.0,
        _ => 0.0,
    }
}

/// Rough skill-tier buckets rather than one code per occupation.
fn occupation_code(value: &str) -> f32 {
    match value {
        "Prof-specialty" => 6.0,
        "Exec-managerial" => 5.0,
        "Tech-support" | "Armed-Forces" => 4.0,
        "Sales" | "Adm-clerical" | "Protective-serv" => 3.0,
        "Craft-repair" | "Transport-moving" | "Machine-op-inspct" => 2.0,
        "Other-service" | "Handlers-cleaners" | "Farming-fishing" | "Priv-house-serv" => 1.0,
        _ => 0.0,
    }
}

fn relationship_code(value: &str) -> f32 {
    match value {
        "Husband" => 3.0,
        "Wife" => 2.0,
        "Own-child" | "Other-relative" => 1.0,
        "Not-in-family" | "Unmarried" => 0.0,
        _ => 0.0,
    }
}

fn race_code(value: &str) -> f32 {
    match value {
        "White" => 1.0,
        "Black" => 2.0,
        "Asian-Pac-Islander" => 3.0,
        "Amer-Indian-Eskimo" => 4.0,
        "Other" => 5.0,
        _ => 0.0,
    }
}
