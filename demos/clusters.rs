extern crate somcalc;

use rand::Rng;

fn generate_data(num_samples: usize) -> Vec<Vec<f64>> {
    let mut rng = rand::thread_rng();
    let centers = [[0.2, 0.2], [0.8, 0.3], [0.5, 0.9]];

    let mut data = Vec::new();
    for i in 0..num_samples {
        let center = centers[i % centers.len()];
        let dx: f64 = rng.gen_range(-0.05..0.05);
        let dy: f64 = rng.gen_range(-0.05..0.05);
        data.push(vec![center[0] + dx, center[1] + dy]);
    }
    data
}

fn main() {
    use somcalc::trainer::*;
    use somcalc::Mat;

    let samples = Mat::from_rows("samples", &generate_data(300)).unwrap();
    let initial = Mat::random(Some(1), 3, &samples.column_bounds().unwrap());
    let training = Trainer::new()
        .learning_rate(0.1)
        .iterations(20)
        .logging(Logging::Silent)
        .train(&samples, initial.clone())
        .unwrap();

    println!("Initial weights:\n{}\n", initial);
    println!("Final weights:\n{}", training.weights);
}
