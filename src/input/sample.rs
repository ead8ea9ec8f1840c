//! Built-in demonstration batch

/// Ten machines covering both classifications
pub const SAMPLE_CSV: &str = "\
machine_id,runtime_hours,vibration_level,temperature,maintenance_threshold,max_operating_hours,scaling_factor
M501,50,2,80,30,200,5
M502,40,3,85,35,300,4
M503,30,2,65,25,100,3
M504,60,4,90,20,120,2
M505,70,3,75,15,150,3
M506,80,2,88,15,200,5
M507,45,3,82,25,150,3
M508,500,1,75,10,600,1
M509,300,2,85,5,400,1
M510,20,2,70,30,80,2
";
