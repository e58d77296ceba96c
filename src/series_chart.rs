use ndarray::Array1;
use plotters::{
    coord::Shift,
    prelude::{ChartBuilder, DrawingArea, DrawingAreaErrorKind, DrawingBackend, LineSeries},
    style::{IntoFont, RED, WHITE},
};

// An x/y series with a margin around its extent, for plotting spectra.
pub struct SeriesChart {
    x: Array1<f64>,
    y: Array1<f64>,
    border_x: f64,
    border_y: f64,
}

impl SeriesChart {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> SeriesChart {
        assert_eq!(x.len(), y.len());
        SeriesChart {
            x,
            y,
            border_x: 0.02,
            border_y: 0.1,
        }
    }

    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let min = |a: &Array1<f64>| a.iter().copied().min_by(|x, y| x.total_cmp(y)).unwrap_or(0.);
        let max = |a: &Array1<f64>| a.iter().copied().max_by(|x, y| x.total_cmp(y)).unwrap_or(1.);

        let (min_x, max_x) = (min(&self.x), max(&self.x));
        let (min_y, max_y) = (min(&self.y), max(&self.y));
        let dist_x = (max_x - min_x).max(1e-6);
        let dist_y = (max_y - min_y).max(1e-6);

        (
            min_x - dist_x * self.border_x / 2.,
            max_x + dist_x * self.border_x / 2.,
            min_y - dist_y * self.border_y / 2.,
            max_y + dist_y * self.border_y / 2.,
        )
    }

    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        caption: &str,
        x_desc: &str,
        y_desc: &str,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (bottom_x, top_x, bottom_y, top_y) = self.bounds();

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(caption, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(bottom_x..top_x, bottom_y..top_y)?;

        chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

        chart.draw_series(LineSeries::new(
            self.x.iter().copied().zip(self.y.iter().copied()),
            &RED,
        ))?;

        root.present()
    }
}
