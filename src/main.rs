use speccore::algorithm::crop::CropConfig;
use speccore::data::collection::SpectrumCollection;
use speccore::data::spectrum::LinearSpectrum;

fn main() {
    env_logger::init();

    let x: Vec<f64> = (0..1000).map(|i| i as f64 / 10.0).collect();
    let y: Vec<f64> = x.iter().map(|&v| (v / 5.0).sin().powi(2)).collect();
    let spectrum = LinearSpectrum::with_units(x, y, "nm", "A");

    let binned = spectrum.bin_to_resolution(1.0).expect("binning failed");
    println!("{}", binned);

    let cropped = binned
        .crop(Some(20.0), Some(40.0), &CropConfig::default())
        .expect("cropping failed");
    println!("{}", cropped);

    let collection = SpectrumCollection::new(vec![spectrum, cropped]);
    let (start, end) = collection.overlap_range().expect("no overlap");
    println!("overlap: {:.1} to {:.1}", start, end);
}
