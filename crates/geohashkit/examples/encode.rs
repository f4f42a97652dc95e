//! Minimal geohash example: encode a point, decode it and list its neighbors.

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let sf = geohashkit::encode(37.7749, -122.4194, 8)?;
    println!("San Francisco: {sf}");

    let bbox = sf.decode_to_interval();
    println!(
        "Cell spans lat [{}, {}], lng [{}, {}]",
        bbox.lat.low, bbox.lat.high, bbox.lng.low, bbox.lng.high
    );
    println!("Rounded center: {:?}", geohashkit::decode_rounded(sf.as_str())?);

    for (i, cell) in sf.neighbors(1)?.iter().enumerate() {
        println!("neighbor {i}: {cell}");
    }

    assert!(bbox.contains(37.7749, -122.4194));

    Ok(())
}
