/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/

use super::*;
use crate::core::utilities::ALIGNMENT;
use pretty_assertions::assert_eq;

fn erase_100() -> Vec<u8> {
    let mut data = vec![
        0x55, 0xAA, 0xAA, 0x55, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
        0x00,
    ];
    data.extend_from_slice(&[0u8; 16]);
    data
}

/// One instance of every tagged variant.
fn all_commands() -> Vec<Command> {
    vec![
        Erase::new(100, 0, 0).into(),
        Load::new(0x2000_0000, 0x400, 1).into(),
        Execute::new(0x1000_0101).into(),
        Call::new(0x1000_0201).into(),
        ProgFuses::new(100, vec![0, 1, 2, 3]).unwrap().into(),
        ProgIfr::new(100, vec![0xA5; 100]).unwrap().into(),
        LoadCmac::new(100, 32, 2).into(),
        CopyMemory::new(100, 0x80, 0x3000_0000, 1, 2).into(),
        LoadHashLocking::new(100, 64, 0).into(),
        LoadKeyBlob::new(100, LoadKeyBlob::NXP_CUST_KEK_EXT_SK, b"xxxxxxxxxx".to_vec())
            .unwrap()
            .into(),
        ConfigureMemory::new(100, 9).into(),
        FillMemory::new(100, 0x200, 0).into(),
        FwVersionCheck::new(100, CounterId::Secure).into(),
    ]
}

#[test]
fn test_cmd_erase() {
    let cmd = Erase::new(100, 0, 0);
    assert!(!cmd.info().is_empty());

    let data = cmd.export();
    assert_eq!(data, erase_100());

    let parsed = Erase::parse(&data).unwrap();
    assert_eq!(parsed.address, 100);
    assert_eq!(parsed.length, 0);
    assert_eq!(parsed.memory_id, 0);
}

#[test]
fn test_cmd_load_family_round_trip() {
    let load = Load::new(0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF);
    assert_eq!(Load::parse(&load.export()).unwrap(), load);

    let cmac = LoadCmac::new(100, 0, 3);
    assert_eq!(cmac.export().len(), 32);
    assert_eq!(LoadCmac::parse(&cmac.export()).unwrap(), cmac);

    let locking = LoadHashLocking::new(0, 16, 7);
    assert_eq!(LoadHashLocking::parse(&locking.export()).unwrap(), locking);

    let fill = FillMemory::new(0x2000_0000, 0x100, 1);
    assert_eq!(FillMemory::parse(&fill.export()).unwrap(), fill);
}

#[test]
fn test_cmd_execute_and_call_are_one_unit() {
    let exec = Execute::new(100);
    let data = exec.export();
    assert_eq!(data.len(), HEADER_SIZE);
    assert_eq!(Execute::parse(&data).unwrap(), exec);

    let call = Call::new(100);
    let data = call.export();
    assert_eq!(data.len(), HEADER_SIZE);
    assert_eq!(Call::parse(&data).unwrap(), call);
}

#[test]
fn test_cmd_prog_fuses_length_follows_data() {
    let mut cmd = ProgFuses::new(100, vec![0, 1, 2, 3]).unwrap();
    assert_eq!(cmd.length(), 4);
    assert_eq!(cmd.export().len(), HEADER_SIZE + 4 * 4);

    cmd.set_data(vec![0, 1, 2, 3, 4]).unwrap();
    assert_eq!(cmd.length(), 5);

    let data = cmd.export();
    assert_eq!(data.len(), 48);
    assert_eq!(&data[8..12], &5u32.to_le_bytes());
    assert!(data[36..].iter().all(|b| *b == 0));
    assert_eq!(ProgFuses::parse(&data).unwrap(), cmd);
}

#[test]
fn test_cmd_prog_fuses_unpadded_buffer_is_truncated() {
    let cmd = ProgFuses::new(100, vec![0, 1, 2, 3, 4]).unwrap();
    let data = cmd.export();
    assert_eq!(
        ProgFuses::parse(&data[..36]),
        Err(CommandError::Truncated {
            offset: 0,
            needed: 48,
            available: 36
        })
    );
}

#[test]
fn test_cmd_prog_ifr() {
    let cmd = ProgIfr::new(100, vec![0u8; 100]).unwrap();
    let data = cmd.export();
    assert_eq!(data.len(), 128);
    assert_eq!(&data[8..12], &100u32.to_le_bytes());
    assert_eq!(ProgIfr::parse(&data).unwrap(), cmd);
}

#[test]
fn test_cmd_copy() {
    let cmd = CopyMemory::new(100, 0, 0, 0, 0);
    let data = cmd.export();
    assert_eq!(data.len(), 32);
    assert_eq!(CopyMemory::parse(&data).unwrap(), cmd);

    let cmd = CopyMemory::new(0x1000, 0x20, 0x2000_0000, 1, 2);
    let data = cmd.export();
    assert_eq!(&data[16..32], &[0x00, 0x00, 0x00, 0x20, 1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(CopyMemory::parse(&data).unwrap(), cmd);
}

#[test]
fn test_cmd_load_key_blob() {
    let cmd = LoadKeyBlob::new(100, LoadKeyBlob::NXP_CUST_KEK_EXT_SK, b"xxxxxxxxxx".to_vec())
        .unwrap();
    assert_eq!(cmd.address(), 100);
    assert_eq!(cmd.length(), 10);
    assert_eq!(cmd.key_wrap_id, 17);

    let data = cmd.export();
    let mut expected = vec![
        0x55, 0xAA, 0xAA, 0x55, 0x64, 0x00, 0x11, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00,
        0x00,
    ];
    expected.extend_from_slice(b"xxxxxxxxxx");
    expected.extend_from_slice(&[0u8; 6]);
    assert_eq!(data, expected);

    let parsed = LoadKeyBlob::parse(&data).unwrap();
    assert_eq!(parsed, cmd);
    assert_eq!(parsed.data(), b"xxxxxxxxxx");
}

#[test]
fn test_cmd_configure_memory() {
    let cmd = ConfigureMemory::new(100, 0);
    let data = cmd.export();
    assert_eq!(data.len(), HEADER_SIZE);
    assert_eq!(ConfigureMemory::parse(&data).unwrap(), cmd);
}

#[test]
fn test_cmd_fw_version_check() {
    let cmd = FwVersionCheck::new(100, CounterId::Secure);
    assert_eq!(cmd.counter_id as u32, 2);

    let data = cmd.export();
    assert_eq!(data.len(), HEADER_SIZE);
    assert_eq!(FwVersionCheck::parse(&data).unwrap(), cmd);
}

#[test]
fn test_cmd_fw_version_check_unknown_counter() {
    let mut data = FwVersionCheck::new(1, CounterId::None).export();
    data[8..12].copy_from_slice(&6u32.to_le_bytes());
    assert_eq!(
        FwVersionCheck::parse(&data),
        Err(CommandError::OutOfRange {
            field: "counter id",
            value: 6,
            max: 5
        })
    );
}

#[test]
fn test_every_export_is_aligned_and_round_trips() {
    for cmd in all_commands() {
        let data = cmd.export();
        assert_eq!(data.len() % ALIGNMENT, 0, "{} is not aligned", cmd);
        assert_eq!(data.len(), cmd.export_len());
        assert_eq!(parse_command(&data).unwrap(), cmd);
    }
}

/// Parses `data` strictly as the record kind that owns `tag`.
fn parse_as(tag: CmdTag, data: &[u8]) -> Result<Command, CommandError> {
    let cmd = match tag {
        CmdTag::Erase => Erase::parse(data)?.into(),
        CmdTag::Load => Load::parse(data)?.into(),
        CmdTag::Execute => Execute::parse(data)?.into(),
        CmdTag::Call => Call::parse(data)?.into(),
        CmdTag::ProgFuses => ProgFuses::parse(data)?.into(),
        CmdTag::ProgIfr => ProgIfr::parse(data)?.into(),
        CmdTag::LoadCmac => LoadCmac::parse(data)?.into(),
        CmdTag::Copy => CopyMemory::parse(data)?.into(),
        CmdTag::LoadHashLocking => LoadHashLocking::parse(data)?.into(),
        CmdTag::LoadKeyBlob => LoadKeyBlob::parse(data)?.into(),
        CmdTag::ConfigureMemory => ConfigureMemory::parse(data)?.into(),
        CmdTag::FillMemory => FillMemory::parse(data)?.into(),
        CmdTag::FwVersionCheck => FwVersionCheck::parse(data)?.into(),
    };
    Ok(cmd)
}

#[test]
fn test_foreign_tag_is_rejected() {
    for cmd in all_commands() {
        let own = cmd.cmd_tag();
        for tag in CmdTag::ALL {
            let data = cmd.export_with_tag(tag.into());
            if tag == own {
                assert_eq!(data, cmd.export());
                assert_eq!(parse_as(own, &data).unwrap(), cmd);
                continue;
            }
            assert_eq!(
                parse_as(own, &data),
                Err(CommandError::TagMismatch {
                    expected: own,
                    found: tag as u32
                }),
                "{} exported as {}",
                own,
                tag
            );
        }
    }
}

#[test]
fn test_max_values_round_trip() {
    let copy = CopyMemory::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX, u32::MAX);
    assert_eq!(CopyMemory::parse(&copy.export()).unwrap(), copy);

    let version = FwVersionCheck::new(u32::MAX, CounterId::Bootloader);
    assert_eq!(FwVersionCheck::parse(&version.export()).unwrap(), version);

    let blob = LoadKeyBlob::new(0xFFFF, 0xFFFF, vec![0xFF; 16]).unwrap();
    let data = blob.export();
    assert_eq!(&data[4..8], &[0xFF; 4]);
    let parsed = LoadKeyBlob::parse(&data).unwrap();
    assert_eq!((parsed.offset, parsed.key_wrap_id), (0xFFFF, 0xFFFF));
    assert_eq!(parsed, blob);
}

#[test]
fn test_parse_at_offset() {
    let mut data = Execute::new(1).export();
    data.extend_from_slice(&Erase::new(100, 0, 0).export());

    assert_eq!(Erase::parse_at(&data, 16).unwrap(), Erase::new(100, 0, 0));
    assert_eq!(
        parse_command_at(&data, 16).unwrap(),
        Command::Erase(Erase::new(100, 0, 0))
    );
}

#[test]
fn test_equality_is_structural() {
    assert_eq!(Erase::new(1, 2, 3), Erase::new(1, 2, 3));
    assert_ne!(Erase::new(1, 2, 3), Erase::new(1, 2, 4));
    assert_ne!(
        Command::from(Execute::new(100)),
        Command::from(Call::new(100))
    );
}

#[test]
fn test_dispatcher_selects_variant() {
    let data = erase_100();
    assert!(matches!(parse_command(&data), Ok(Command::Erase(_))));

    let mut data = erase_100();
    data[12] = 0x02;
    assert!(matches!(parse_command(&data), Ok(Command::Load(_))));

    let data = [
        0x55, 0xAA, 0xAA, 0x55, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00,
        0x00,
    ];
    assert_eq!(parse_command(&data), Ok(Command::Execute(Execute::new(100))));
}

#[test]
fn test_dispatcher_errors_are_distinct() {
    let unknown = [
        0x55, 0xAA, 0xAA, 0x55, 0x64, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];
    assert_eq!(parse_command(&unknown), Err(CommandError::UnknownTag(0)));

    assert_eq!(
        parse_command(&[0u8; SECTION_HEADER_SIZE]),
        Err(CommandError::InvalidMagic { found: 0 })
    );

    assert!(matches!(
        parse_command(&unknown[..12]),
        Err(CommandError::Truncated { needed: 16, .. })
    ));
}

#[test]
fn test_section_header() {
    let cmd = SectionHeader::new(10, 10, 100);
    let data = cmd.export();
    assert_eq!(data.len(), SECTION_HEADER_SIZE);

    let parsed = SectionHeader::parse(&data, 0).unwrap();
    assert_eq!(parsed.section_uid, 10);
    assert_eq!(parsed.section_type, 10);
    assert_eq!(parsed.length, 100);
}

#[test]
fn test_section_header_identity() {
    let a = SectionHeader {
        section_uid: 10,
        ..Default::default()
    };
    let b = SectionHeader {
        section_uid: 500,
        ..Default::default()
    };
    assert_ne!(a, b);
}

#[test]
fn test_section_header_info() {
    let info = SectionHeader::default().info();
    for label in ["UID", "Type"] {
        assert!(info.contains(label), "{label} is not in {info}");
    }
}

#[test]
fn test_section_header_offset() {
    let data = SectionHeader::default().export();
    assert_eq!(
        SectionHeader::parse(&data, 50),
        Err(CommandError::InvalidOffset {
            record: "section header",
            offset: 50
        })
    );
}
