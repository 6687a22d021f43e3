/*!
 * Descriptor Validation
 * Field count, numeric well-formedness and positivity checks
 */

use crate::core::errors::DescriptorError;
use crate::core::limits::{DESCRIPTOR_FIELDS, DESCRIPTOR_SEPARATOR};
use crate::process::ProcessDescriptor;
use std::num::IntErrorKind;

/// Parse one `pid|ppid|pc|registers|size|resourceUnits|quantum|iterations`
/// line into a validated descriptor
///
/// Every numeric field is parsed before any positivity check, so a line with
/// both kinds of fault reports the parse fault.
pub(super) fn parse_descriptor(line: &str) -> Result<ProcessDescriptor, DescriptorError> {
    let fields: Vec<&str> = line.split(DESCRIPTOR_SEPARATOR).map(str::trim).collect();
    if fields.len() != DESCRIPTOR_FIELDS {
        return Err(DescriptorError::FieldCount {
            expected: DESCRIPTOR_FIELDS,
            found: fields.len(),
        });
    }

    let pid = parse_int("pid", fields[0])?;
    let ppid = parse_int("ppid", fields[1])?;
    let pc = fields[2];
    let registers = parse_int("registers", fields[3])?;
    let size = parse_int("size", fields[4])?;
    let resource_units = parse_int("resource_units", fields[5])?;
    let quantum = parse_int("quantum", fields[6])?;
    let iterations = parse_int("iterations", fields[7])?;

    Ok(ProcessDescriptor {
        pid: positive("pid", pid)?,
        ppid,
        pc: pc.to_string(),
        registers: positive("registers", registers)?,
        size: positive("size", size)?,
        resource_units: positive("resource_units", resource_units)?,
        quantum: positive("quantum", quantum)?,
        iterations: positive("iterations", iterations)?,
    })
}

fn parse_int(field: &str, raw: &str) -> Result<i64, DescriptorError> {
    if raw.contains('.') {
        return Err(DescriptorError::DecimalValue {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }

    raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => DescriptorError::OutOfRange {
            field: field.to_string(),
            value: raw.to_string(),
        },
        _ => DescriptorError::NotNumeric {
            field: field.to_string(),
            value: raw.to_string(),
        },
    })
}

fn positive(field: &str, value: i64) -> Result<u32, DescriptorError> {
    if value <= 0 {
        return Err(DescriptorError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
    u32::try_from(value).map_err(|_| DescriptorError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
    })
}
