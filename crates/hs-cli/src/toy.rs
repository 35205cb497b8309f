//! Toy samples for the demo plots.

use anyhow::Result;
use hs_hist::Series;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Normal};

pub struct ToySamples {
    pub data: Series,
    pub bkg: Series,
    pub signal: Series,
    pub bkg_tot: Series,
    pub ratio: Series,
    pub ratio_nosignal: Series,
    pub hist2d: Series,
}

fn fill_from<D: Distribution<f64>>(series: &mut Series, dist: &D, n: usize, rng: &mut StdRng) {
    for _ in 0..n {
        series.fill(dist.sample(rng));
    }
}

/// Background falling with scale 30, Gaussian signal at 30 of width 5, and a
/// pseudo-data sample drawn independently from both.
///
/// Background is normalised to 1, signal to 0.1 and data to their sum.
pub fn generate(seed: u64) -> Result<ToySamples> {
    let mut rng = StdRng::seed_from_u64(seed);
    let falling = Exp::new(1.0 / 30.0)?;
    let peak = Normal::new(30.0, 5.0)?;

    let mut data = Series::uniform_1d("data", 50, 0.0, 100.0)?;
    let mut bkg = Series::uniform_1d("bkg", 50, 0.0, 100.0)?;
    let mut signal = Series::uniform_1d("signal", 50, 0.0, 100.0)?;
    fill_from(&mut bkg, &falling, 10_000, &mut rng);
    fill_from(&mut data, &falling, 10_000, &mut rng);
    fill_from(&mut signal, &peak, 1_000, &mut rng);
    fill_from(&mut data, &peak, 1_000, &mut rng);

    signal.scale(0.1 / signal.integral());
    bkg.scale(1.0 / bkg.integral());
    let bkg_tot = bkg.added(&signal, "bkg_tot")?;
    data.scale(bkg_tot.integral() / data.integral());
    let ratio = data.divided(&bkg_tot, "ratio")?;
    let ratio_nosignal = data.divided(&bkg, "ratio_nosignal")?;

    let mut hist2d = Series::uniform_2d("hist2d", 25, 0.0, 5.0, 25, 0.0, 5.0)?.with_title("2D Histogram");
    let blob = Normal::new(2.5, 1.0)?;
    for _ in 0..200_000 {
        let (x, y) = (blob.sample(&mut rng), blob.sample(&mut rng));
        hist2d.fill_2d(x, y, 1.0);
    }
    hist2d.scale(10.0 / hist2d.integral());

    tracing::debug!(seed, data = data.integral(), bkg_tot = bkg_tot.integral(), "generated toy samples");
    Ok(ToySamples { data, bkg, signal, bkg_tot, ratio, ratio_nosignal, hist2d })
}
