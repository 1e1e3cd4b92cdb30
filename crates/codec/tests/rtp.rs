use anyhow::Result;
use bytes::{Bytes, BytesMut};
use rand::Rng;
use rtp_packet_codec::{
    BufferMut, Error, ExtensionHeader, RtpPacket,
    payload_type::{AudioPayloadType, PayloadKind},
};

#[rustfmt::skip]
mod samples {
    pub const G711_PCMA: &[u8] = include_bytes!("samples/G711Pcma.bin");
    pub const ALL_ENABLED: &[u8] = include_bytes!("samples/AllEnabled.bin");
    pub const INVALID_VERSION: &[u8] = include_bytes!("samples/InvalidVersion.bin");
    pub const INVALID_PADDING: &[u8] = include_bytes!("samples/InvalidPadding.bin");
    pub const PADDING_OVERFLOW: &[u8] = include_bytes!("samples/PaddingOverflow.bin");
    pub const INVALID_CSRC: &[u8] = include_bytes!("samples/InvalidCsrc.bin");
    pub const INVALID_EXTENSION: &[u8] = include_bytes!("samples/InvalidExtension.bin");
}

fn build_all_enabled<B: BufferMut>(buffer: B) -> Result<RtpPacket<B>> {
    let mut packet = RtpPacket::new(buffer)?;

    packet.set_padding_bytes(4)?;
    packet.set_extension(Some(ExtensionHeader::new(0xbede, 1)))?;
    packet.extension_data_mut().copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    packet.csrc_mut()[0] = 0x11;
    packet.csrc_mut()[1] = 0x22;
    packet.set_csrc(2)?;

    packet.set_marker(true)?;
    packet.set_payload_type(127)?;
    packet.set_sequence_number(6)?;
    packet.set_timestamp(512)?;
    packet.set_ssrc(0x55667788)?;

    packet.set_payload_size(3)?;
    packet.payload_mut().copy_from_slice(&[1, 2, 3]);
    Ok(packet)
}

#[test]
#[rustfmt::skip]
fn test_rtp_packet_codec() -> Result<()> {
    {
        let packet = RtpPacket::decode(samples::G711_PCMA)?;

        assert_eq!(packet.version(), 2);
        assert!(!packet.is_padded());
        assert!(!packet.is_extended());
        assert!(!packet.is_marked());
        assert_eq!(packet.csrc_count(), 0);
        assert_eq!(packet.payload_kind(), PayloadKind::Audio(AudioPayloadType::Pcma));
        assert_eq!(packet.sequence_number(), 1);
        assert_eq!(packet.timestamp(), 160);
        assert_eq!(packet.ssrc(), 0x12345678);
        assert_eq!(packet.payload_offset(), 12);
        assert_eq!(packet.payload_size(), 160);
        assert_eq!(packet.packet_size(), 172);
        assert!(packet.payload().iter().all(|it| *it == 0xd5));
    }

    {
        let packet = RtpPacket::decode(samples::ALL_ENABLED)?;

        assert!(packet.is_padded());
        assert!(packet.is_extended());
        assert!(packet.is_marked());
        assert_eq!(packet.padding_bytes(), 4);
        assert_eq!(packet.payload_type(), 127);
        assert_eq!(packet.payload_kind(), PayloadKind::Dynamic(127));
        assert_eq!(packet.sequence_number(), 6);
        assert_eq!(packet.timestamp(), 512);
        assert_eq!(packet.ssrc(), 0x55667788);
        assert_eq!(packet.csrc(), &[0x11, 0x22]);
        assert_eq!(packet.extension(), Some(ExtensionHeader::new(0xbede, 1)));
        assert_eq!(packet.extension_id(), 0xbede);
        assert_eq!(packet.extension_length(), 1);
        assert_eq!(packet.extension_data(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(packet.payload_offset(), 28);
        assert_eq!(packet.payload(), &[1, 2, 3]);
        assert_eq!(packet.as_bytes(), samples::ALL_ENABLED);
    }

    Ok(())
}

#[test]
fn test_every_backing_parses_the_same() -> Result<()> {
    let size = samples::ALL_ENABLED.len();

    let mut fixed = [0u8; 1500];
    fixed[..size].copy_from_slice(samples::ALL_ENABLED);
    let fixed = RtpPacket::decode_with_size(fixed, size)?;

    let mut storage = samples::ALL_ENABLED.to_vec();
    let borrowed = RtpPacket::decode(&mut storage[..])?;

    let growable = RtpPacket::decode(samples::ALL_ENABLED.to_vec())?;
    let bytes_mut = RtpPacket::decode(BytesMut::from(samples::ALL_ENABLED))?;
    let bytes = RtpPacket::decode(Bytes::from_static(samples::ALL_ENABLED))?;

    for packet in [
        fixed.as_bytes(),
        borrowed.as_bytes(),
        growable.as_bytes(),
        bytes_mut.as_bytes(),
        bytes.as_bytes(),
    ] {
        assert_eq!(packet, samples::ALL_ENABLED);
    }

    assert_eq!(fixed.payload(), bytes.payload());
    assert_eq!(borrowed.csrc(), growable.csrc());
    assert_eq!(bytes_mut.extension_data(), fixed.extension_data());
    Ok(())
}

#[test]
#[rustfmt::skip]
fn test_rejected_packets() -> Result<()> {
    let mut packet = RtpPacket::decode(samples::ALL_ENABLED)?;

    assert_eq!(packet.parse(samples::INVALID_VERSION), Err(Error::InvalidRtpHeader));
    assert_eq!(packet.parse(samples::INVALID_PADDING), Err(Error::InvalidRtpHeader));
    assert_eq!(packet.parse(samples::PADDING_OVERFLOW), Err(Error::ParseBufferOverflow));
    assert_eq!(packet.parse(samples::INVALID_CSRC), Err(Error::ParseBufferOverflow));
    assert_eq!(packet.parse(samples::INVALID_EXTENSION), Err(Error::ParseExtensionOverflow));
    assert_eq!(packet.parse(&samples::G711_PCMA[..11]), Err(Error::InvalidHeaderLength));
    assert_eq!(packet.parse_with_size(samples::G711_PCMA, 173), Err(Error::ParseBufferOverflow));

    // nothing from the last good packet survives a rejection.
    assert_eq!(packet.packet_size(), 0);
    assert_eq!(packet.csrc_count(), 0);
    assert_eq!(packet.payload_type(), 0);
    assert_eq!(packet.extension(), None);
    assert!(packet.as_bytes().is_empty());

    packet.parse(samples::G711_PCMA)?;
    assert_eq!(packet.payload_size(), 160);
    Ok(())
}

#[test]
fn test_strict_payload_types() -> Result<()> {
    let mut reserved = samples::G711_PCMA.to_vec();
    reserved[1] = 72;

    let mut packet = RtpPacket::decode(samples::G711_PCMA)?;

    packet.set_strict(false);
    packet.parse(&reserved[..])?;
    assert_eq!(packet.payload_kind(), PayloadKind::Reserved(72));

    packet.set_strict(true);
    assert_eq!(packet.parse(&reserved[..]), Err(Error::InvalidRtpHeader));

    packet.parse(samples::ALL_ENABLED)?;
    assert_eq!(packet.payload_kind(), PayloadKind::Dynamic(127));
    Ok(())
}

#[test]
fn test_build_packet_on_every_backing() -> Result<()> {
    assert_eq!(build_all_enabled([0u8; 200])?.packet(), samples::ALL_ENABLED);
    assert_eq!(build_all_enabled(Vec::new())?.packet(), samples::ALL_ENABLED);
    assert_eq!(build_all_enabled(BytesMut::new())?.packet(), samples::ALL_ENABLED);

    let mut storage = [0u8; 35];
    assert_eq!(build_all_enabled(&mut storage[..])?.packet(), samples::ALL_ENABLED);

    let mut storage = [0u8; 34];
    assert_eq!(
        build_all_enabled(&mut storage[..]).err().and_then(|e| e.downcast::<Error>().ok()),
        Some(Error::BufferTooSmall)
    );

    let mut storage = [0u8; 11];
    assert_eq!(
        RtpPacket::new(&mut storage[..]).err(),
        Some(Error::FixedBufferTooSmall)
    );

    Ok(())
}

#[test]
fn test_fixed_backing_limits() -> Result<()> {
    let mut packet = RtpPacket::new([0u8; 200])?;

    for count in 0..=15u8 {
        packet.set_csrc(count)?;
        assert_eq!(packet.packet().len(), 12 + 4 * count as usize);
        assert_eq!(packet.payload_offset(), packet.packet_size());
    }

    assert_eq!(packet.set_csrc(16), Err(Error::InvalidCsrcCount));
    assert_eq!(packet.set_csrc_list(&[0; 16]), Err(Error::InvalidCsrcCount));
    assert_eq!(packet.csrc_count(), 15);
    assert_eq!(packet.packet_size(), 72);

    packet.set_csrc(0)?;
    assert_eq!(packet.packet_size(), 12);

    packet.set_padding_bytes(100)?;
    assert_eq!(packet.packet_size(), 112);
    assert_eq!(packet.set_padding_bytes(200), Err(Error::BufferTooSmall));
    assert_eq!(packet.packet_size(), 112);
    assert_eq!(packet.packet()[111], 100);

    packet.set_padding_bytes(0)?;
    assert!(!packet.is_padded());

    packet.set_extension(Some(ExtensionHeader::new(1, 2)))?;
    assert_eq!(packet.packet_size(), 24);
    assert_eq!(
        packet.set_extension(Some(ExtensionHeader::new(1, 200))),
        Err(Error::BufferTooSmall)
    );

    assert_eq!(packet.extension_length(), 2);

    packet.set_payload_size(160)?;
    assert_eq!(packet.packet_size(), 184);
    assert_eq!(packet.set_payload_size(220), Err(Error::BufferTooSmall));
    assert_eq!(packet.payload_size(), 160);
    assert_eq!(packet.packet_size(), 184);
    Ok(())
}

#[test]
fn test_oversized_payload_is_refused() -> Result<()> {
    let mut packet = RtpPacket::new([0u8; 64])?;
    packet.set_padding_bytes(4)?;
    packet.set_payload_size(8)?;

    assert_eq!(packet.set_payload_size(usize::MAX - 4), Err(Error::BufferTooSmall));
    assert_eq!(packet.set_payload_size(usize::MAX), Err(Error::BufferTooSmall));
    assert_eq!(packet.payload_size(), 8);
    assert_eq!(packet.packet_size(), 24);
    assert_eq!(packet.payload().len(), 8);

    let mut packet = RtpPacket::<Vec<u8>>::default();
    assert_eq!(packet.set_payload_size(usize::MAX), Err(Error::BufferTooSmall));
    assert_eq!(packet.packet_size(), 12);
    Ok(())
}

#[test]
fn test_resize_existing_extension() -> Result<()> {
    let mut packet = RtpPacket::new([0u8; 128])?;
    packet.set_csrc_list(&[0x11, 0x22])?;
    packet.set_extension(Some(ExtensionHeader::new(0xbede, 1)))?;
    packet.extension_data_mut().copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    packet.set_padding_bytes(4)?;
    packet.set_payload_size(3)?;
    packet.payload_mut().copy_from_slice(&[1, 2, 3]);
    assert_eq!(packet.packet_size(), 35);

    packet.set_extension(Some(ExtensionHeader::new(0xbede, 3)))?;
    assert_eq!(packet.packet_size(), 43);
    assert_eq!(packet.payload_offset(), 36);
    assert_eq!(&packet.extension_data()[..4], &[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(packet.payload(), &[1, 2, 3]);
    assert_eq!(&packet.packet()[39..], &[0, 0, 0, 4]);

    let copy = RtpPacket::decode(packet.packet())?;
    assert_eq!(copy.extension_length(), 3);
    assert_eq!(copy.csrc(), &[0x11, 0x22]);
    assert_eq!(copy.padding_bytes(), 4);
    assert_eq!(copy.payload(), &[1, 2, 3]);

    packet.set_extension(Some(ExtensionHeader::new(0xbede, 0)))?;
    assert_eq!(packet.packet_size(), 31);
    assert!(packet.extension_data().is_empty());
    assert_eq!(packet.payload(), &[1, 2, 3]);

    let copy = RtpPacket::decode(packet.packet())?;
    assert!(copy.is_extended());
    assert_eq!(copy.extension_length(), 0);
    assert_eq!(copy.padding_bytes(), 4);
    assert_eq!(copy.payload(), &[1, 2, 3]);

    packet.set_extension(None)?;
    assert_eq!(packet.packet_size(), 27);

    let copy = RtpPacket::decode(packet.packet())?;
    assert!(!copy.is_extended());
    assert_eq!(copy.csrc(), &[0x11, 0x22]);
    assert_eq!(copy.payload(), &[1, 2, 3]);
    Ok(())
}

#[test]
fn test_edit_parsed_packet() -> Result<()> {
    let mut packet = RtpPacket::decode(samples::ALL_ENABLED.to_vec())?;

    packet.set_csrc(0)?;
    assert_eq!(packet.packet_size(), 27);
    assert_eq!(packet.payload(), &[1, 2, 3]);
    assert_eq!(packet.extension_data(), &[0xde, 0xad, 0xbe, 0xef]);

    let size = packet.packet_size();
    packet.reparse(size)?;
    assert_eq!(packet.csrc_count(), 0);
    assert_eq!(packet.padding_bytes(), 4);
    assert_eq!(packet.payload(), &[1, 2, 3]);
    assert_eq!(packet.extension_id(), 0xbede);

    packet.set_extension(None)?;
    packet.set_padding_bytes(0)?;
    assert_eq!(packet.packet_size(), 15);
    assert_eq!(packet.payload(), &[1, 2, 3]);

    packet.set_csrc_list(&[7, 8, 9])?;
    assert_eq!(packet.payload_offset(), 24);
    assert_eq!(packet.payload(), &[1, 2, 3]);

    packet.csrc_mut()[2] = 10;
    packet.commit_csrc()?;

    let copy = RtpPacket::decode(packet.packet())?;
    assert_eq!(copy.csrc(), &[7, 8, 10]);
    assert_eq!(copy.ssrc(), 0x55667788);
    assert_eq!(copy.payload(), &[1, 2, 3]);
    Ok(())
}

#[test]
fn test_setter_after_rejection_starts_empty() -> Result<()> {
    let mut packet = RtpPacket::<Vec<u8>>::default();
    assert!(packet.parse(samples::INVALID_VERSION.to_vec()).is_err());
    assert_eq!(packet.packet_size(), 0);

    packet.set_ssrc(1)?;
    assert_eq!(packet.packet(), &[0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(packet.buffer().len(), 12);
    Ok(())
}

#[test]
fn test_render_packet() -> Result<()> {
    let text = RtpPacket::decode(samples::ALL_ENABLED)?.to_string();
    assert!(text.contains("Payload type: Dynamic RTP 127"));
    assert!(text.contains("SSRC: 0x55667788"));
    assert!(text.contains("CSRC: [ 0x00000011, 0x00000022 ]"));
    assert!(text.contains("Extension id: 0xbede"));
    assert!(text.contains("de ad be ef"));

    let text = RtpPacket::decode(samples::G711_PCMA)?.to_string();
    assert!(text.contains("Payload type: PCMA 8"));
    assert!(text.contains("CSRC: [ None ]"));
    assert!(text.contains("d5 d5  d5 d5"));
    Ok(())
}

#[test]
fn test_random_packets_survive_a_decode() -> Result<()> {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let csrc = (0..rng.random_range(0..=15))
            .map(|_| rng.random::<u32>())
            .collect::<Vec<_>>();

        let extension = rng
            .random_bool(0.5)
            .then(|| ExtensionHeader::new(rng.random(), rng.random_range(0..4)));

        let payload = (0..rng.random_range(0..64))
            .map(|_| rng.random::<u8>())
            .collect::<Vec<_>>();

        let padding_bytes = rng.random_range(0..=32u8);
        let marker = rng.random_bool(0.5);
        let payload_type = rng.random_range(96..=127u8);
        let sequence_number = rng.random::<u16>();
        let timestamp = rng.random::<u32>();
        let ssrc = rng.random::<u32>();

        let mut packet = RtpPacket::<BytesMut>::default();
        packet.set_csrc_list(&csrc)?;
        packet.set_extension(extension)?;
        packet.extension_data_mut().fill(0xab);
        packet.set_payload_size(payload.len())?;
        packet.payload_mut().copy_from_slice(&payload);
        packet.set_padding_bytes(padding_bytes)?;
        packet.set_marker(marker)?;
        packet.set_payload_type(payload_type)?;
        packet.set_sequence_number(sequence_number)?;
        packet.set_timestamp(timestamp)?;
        packet.set_ssrc(ssrc)?;

        let decoded = RtpPacket::decode(packet.packet())?;
        assert_eq!(decoded.csrc(), &csrc[..]);
        assert_eq!(decoded.extension(), extension);
        assert!(decoded.extension_data().iter().all(|it| *it == 0xab));
        assert_eq!(decoded.payload(), &payload[..]);
        assert_eq!(decoded.padding_bytes(), padding_bytes);
        assert_eq!(decoded.is_marked(), marker);
        assert_eq!(decoded.payload_type(), payload_type);
        assert_eq!(decoded.sequence_number(), sequence_number);
        assert_eq!(decoded.timestamp(), timestamp);
        assert_eq!(decoded.ssrc(), ssrc);
        assert_eq!(decoded.packet_size(), packet.packet_size());
    }

    Ok(())
}
